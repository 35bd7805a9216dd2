//! Filename codec
//!
//! Grammar (store format version 1):
//!
//! ```text
//! cycle "," id6 "," created "," "e" edited ["," "c" consumed] *("," "c" parent6) 1*("," tag) ext
//! ```
//!
//! - `cycle` is `a` (alive), `c` (consumed) or `z` (zombie)
//! - dates are `YYYY-MM-DD`
//! - the consumed date is present exactly when the idea is not alive
//! - `ext` is glued onto the last tag with no delimiter
//!
//! Decoding scans parent ids greedily: every token shaped like `c` plus six
//! digits directly after the dates is read as a parent id.

use chrono::NaiveDate;

use crate::error::{QuError, Result};
use crate::idea::{parent_id_token, split_extension, Cycle, Idea, IdeaId, Kind, Tag};

/// Date layout used in filenames and date queries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Token delimiter
pub const DELIMITER: char = ',';

const EDITED_PREFIX: &str = "e";
const CONSUMED_PREFIX: &str = "c";

/// Minimum token count: cycle, id, created, edited and one tag
const MIN_TOKENS: usize = 5;

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| QuError::invalid_value("date", s))
}

/// Serialize an idea into its filename
pub fn encode(idea: &Idea) -> String {
    let mut tokens = vec![
        idea.cycle.prefix().to_string(),
        idea.id.to_string(),
        format_date(idea.created),
        format!("{EDITED_PREFIX}{}", format_date(idea.edited)),
    ];
    if !idea.cycle.is_alive() {
        if let Some(consumed) = idea.consumed {
            tokens.push(format!("{CONSUMED_PREFIX}{}", format_date(consumed)));
        }
    }
    tokens.extend(
        idea.consumes
            .iter()
            .map(|id| format!("{CONSUMED_PREFIX}{id}")),
    );
    tokens.extend(idea.tags.iter().map(ToString::to_string));

    let mut filename = tokens.join(&DELIMITER.to_string());
    filename.push_str(&idea.extension);
    filename
}

/// Deserialize a filename into an idea
pub fn decode(filename: &str) -> Result<Idea> {
    let (stem, extension) = split_extension(filename);
    let kind = Kind::from_extension(extension)
        .map_err(|_| QuError::malformed(filename, format!("unknown filetype {extension:?}")))?;

    let tokens: Vec<&str> = stem.split(DELIMITER).collect();
    if tokens.len() < MIN_TOKENS {
        return Err(QuError::malformed(filename, "too few fields"));
    }

    let cycle = Cycle::from_prefix(tokens[0])
        .ok_or_else(|| QuError::malformed(filename, format!("unknown cycle {:?}", tokens[0])))?;

    let id = tokens[1]
        .parse::<IdeaId>()
        .map_err(|_| QuError::malformed(filename, format!("bad id {:?}", tokens[1])))?;

    let created = parse_date(tokens[2])
        .map_err(|_| QuError::malformed(filename, "bad created date"))?;

    let edited = tokens[3]
        .strip_prefix(EDITED_PREFIX)
        .ok_or_else(|| QuError::malformed(filename, "edit date must start with 'e'"))
        .and_then(|raw| {
            parse_date(raw).map_err(|_| QuError::malformed(filename, "bad edit date"))
        })?;

    let mut rest = &tokens[4..];

    let mut consumed = None;
    if let Some(date) = rest
        .first()
        .and_then(|t| t.strip_prefix(CONSUMED_PREFIX))
        .and_then(|raw| parse_date(raw).ok())
    {
        if cycle.is_alive() {
            return Err(QuError::malformed(filename, "alive idea carries a consumed date"));
        }
        consumed = Some(date);
        rest = &rest[1..];
    }

    let mut consumes = Vec::new();
    while let Some(token) = rest.first() {
        if !parent_id_token().is_match(token) {
            break;
        }
        let parent = token[CONSUMED_PREFIX.len()..]
            .parse::<IdeaId>()
            .map_err(|_| QuError::malformed(filename, format!("bad parent id {token:?}")))?;
        consumes.push(parent);
        rest = &rest[1..];
    }

    if rest.is_empty() {
        return Err(QuError::malformed(filename, "no tags"));
    }
    let tags = rest
        .iter()
        .map(|t| Tag::parse(t).map_err(|e| QuError::malformed(filename, e)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Idea {
        id,
        cycle,
        consumes,
        kind,
        extension: extension.to_string(),
        created,
        edited,
        consumed,
        tags,
    })
}

/// Read only the id field of a filename, without validating the rest
pub fn id_of(filename: &str) -> Result<IdeaId> {
    filename
        .split(DELIMITER)
        .nth(1)
        .ok_or_else(|| QuError::malformed(filename, "missing id"))?
        .parse::<IdeaId>()
        .map_err(|_| QuError::malformed(filename, "bad id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tag(s: &str) -> Tag {
        Tag::parse(s).unwrap()
    }

    #[test]
    fn test_encode_alive() {
        let idea = Idea::new_text(IdeaId::new(5), vec![tag("hello")], date(2024, 1, 1));
        assert_eq!(encode(&idea), "a,000005,2024-01-01,e2024-01-01,hello");
    }

    #[test]
    fn test_encode_consumed_with_parents_and_extension() {
        let idea = Idea {
            id: IdeaId::new(12),
            cycle: Cycle::Consumed,
            consumes: vec![IdeaId::new(3), IdeaId::new(7)],
            kind: Kind::Image,
            extension: ".png".to_string(),
            created: date(2023, 5, 1),
            edited: date(2023, 6, 2),
            consumed: Some(date(2023, 7, 3)),
            tags: vec![tag("scan"), tag("app=journal")],
        };
        assert_eq!(
            encode(&idea),
            "c,000012,2023-05-01,e2023-06-02,c2023-07-03,c000003,c000007,scan,app=journal.png"
        );
        assert_eq!(decode(&encode(&idea)).unwrap(), idea);
    }

    #[test]
    fn test_ids_wider_than_six_digits_are_malformed() {
        assert!(matches!(
            decode("a,1000001,2024-01-01,e2024-01-01,x"),
            Err(QuError::MalformedFilename { .. })
        ));
        assert!(id_of("a,1000001,2024-01-01,e2024-01-01,x").is_err());

        let last = Idea {
            consumes: vec![IdeaId::MAX],
            ..Idea::new_text(IdeaId::MAX, vec![tag("x")], date(2024, 1, 1))
        };
        assert_eq!(encode(&last), "a,999999,2024-01-01,e2024-01-01,c999999,x");
        assert_eq!(decode(&encode(&last)).unwrap(), last);
    }

    #[test]
    fn test_alive_with_consumed_date_is_malformed() {
        assert!(matches!(
            decode("a,000005,2024-01-01,e2024-01-01,c2024-02-02,hello"),
            Err(QuError::MalformedFilename { .. })
        ));
    }

    #[test]
    fn test_decode_concrete_example() {
        let idea = decode("a,000005,2024-01-01,e2024-01-01,hello").unwrap();
        assert_eq!(idea.id, IdeaId::new(5));
        assert_eq!(idea.cycle, Cycle::Alive);
        assert_eq!(idea.kind, Kind::Text);
        assert_eq!(idea.created, date(2024, 1, 1));
        assert_eq!(idea.consumed, None);
        assert!(idea.consumes.is_empty());
        assert_eq!(idea.tags, vec![tag("hello")]);
    }

    #[test]
    fn test_round_trip_zombie() {
        let idea = Idea {
            cycle: Cycle::Zombie,
            consumed: Some(date(2022, 2, 2)),
            consumes: vec![IdeaId::new(1)],
            ..Idea::new_text(IdeaId::new(40), vec![tag("b"), tag("a")], date(2022, 1, 1))
        };
        let filename = encode(&idea);
        assert!(filename.starts_with("z,000040,"));
        assert_eq!(decode(&filename).unwrap(), idea);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let idea = Idea {
            consumes: vec![IdeaId::new(9), IdeaId::new(2), IdeaId::new(5)],
            ..Idea::new_text(
                IdeaId::new(77),
                vec![tag("z"), tag("m"), tag("k=v"), tag("a")],
                date(2021, 12, 31),
            )
        };
        let decoded = decode(&encode(&idea)).unwrap();
        assert_eq!(decoded.consumes, idea.consumes);
        assert_eq!(decoded.tags, idea.tags);
    }

    #[test]
    fn test_decode_encrypted_extension() {
        let idea = decode("a,000002,2024-01-01,e2024-01-02,secret.en").unwrap();
        assert_eq!(idea.kind, Kind::EncryptedText);
        assert_eq!(idea.extension, ".en");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let cases = [
            "a,000005,2024-01-01,e2024-01-01",
            "a,00x005,2024-01-01,e2024-01-01,hello",
            "a,000005,2024-01-01,2024-01-01,hello",
            "a,000005,2024-13-01,e2024-01-01,hello",
            "q,000005,2024-01-01,e2024-01-01,hello",
            "a,000005,2024-01-01,e2024-01-01,hello.docx",
            "c,000005,2024-01-01,e2024-01-01,c2024-02-01,c000001",
            "a,000005,2024-01-01,e2024-01-01,WITHOUT=x",
        ];
        for case in cases {
            assert!(
                matches!(decode(case), Err(QuError::MalformedFilename { .. })),
                "{case} should be malformed"
            );
        }
    }

    #[test]
    fn test_greedy_parent_scan_swallows_id_shaped_tag() {
        // A tag written by an older tool that looks like a parent id
        let idea = decode("a,000010,2024-01-01,e2024-01-01,c123456,real").unwrap();
        assert_eq!(idea.consumes, vec![IdeaId::new(123456)]);
        assert_eq!(idea.tags, vec![tag("real")]);
    }

    #[test]
    fn test_id_of() {
        assert_eq!(
            id_of("c,000321,2024-01-01,e2024-01-01,c2024-01-02,x").unwrap(),
            IdeaId::new(321)
        );
        assert!(id_of("garbage").is_err());
    }
}
