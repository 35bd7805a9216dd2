use std::collections::HashMap;

use chrono::NaiveDate;

use super::*;
use crate::error::QuError;
use crate::idea::{Cycle, Idea, IdeaId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn idea(id: u32, tags: &str, created: NaiveDate) -> Idea {
    let tags = crate::idea::parse_tag_list(tags).unwrap();
    Idea::new_text(IdeaId::new(id), tags, created)
}

#[derive(Default)]
struct Contents(HashMap<u32, &'static str>);

impl ContentSource for Contents {
    fn read_content(&self, idea: &Idea) -> Result<Vec<u8>> {
        self.0
            .get(&idea.id.get())
            .map(|s| s.as_bytes().to_vec())
            .ok_or_else(|| QuError::unknown_id(idea.id))
    }
}

fn query(s: &str) -> Query {
    Query::parse(&KeywordRegistry::standard(), s).unwrap()
}

#[test]
fn test_split_clumped_respects_brackets() {
    assert_eq!(
        split_clumped("a b,WITHOUT=[x,y]  DATES=[2020,2021],"),
        vec!["a", "b", "WITHOUT=[x,y]", "DATES=[2020,2021]"]
    );
    assert!(split_clumped(" , ").is_empty());
}

#[test]
fn test_split_array() {
    assert_eq!(split_array("[a, b,c]"), vec!["a", "b", "c"]);
    assert_eq!(split_array("plain"), vec!["plain"]);
    assert_eq!(split_array("[]"), vec!["[]"]);
}

#[test]
fn test_plain_tags_and_law() {
    let source = Contents::default();
    let both = idea(1, "work,urgent", date(2024, 1, 1));
    let one = idea(2, "work", date(2024, 1, 1));

    let q = query("work,urgent");
    assert!(q.matches_all(&both, &source).unwrap());
    assert!(!q.matches_all(&one, &source).unwrap());
    assert!(q.matches_any(&one, &source).unwrap());
}

#[test]
fn test_and_law_across_families() {
    let source = Contents([(1, "Buy milk"), (2, "Buy bread")].into_iter().collect());
    let candidates = [
        idea(1, "shop", date(2020, 6, 15)),
        idea(2, "shop,done", date(2020, 6, 15)),
        idea(3, "shop", date(2021, 1, 1)),
    ];
    let q = query("shop WITHOUT=done CONTAINS-CI=buy YEAR=2020");

    for candidate in candidates.iter().filter(|c| c.id.get() != 3) {
        let expected = q
            .predicates()
            .iter()
            .all(|p| p.includes(candidate, &source).unwrap());
        assert_eq!(q.matches_all(candidate, &source).unwrap(), expected);
    }
    assert!(q.matches_all(&candidates[0], &source).unwrap());
    assert!(!q.matches_all(&candidates[1], &source).unwrap());
    // date predicate short-circuits before content is read
    assert!(!query("YEAR=2020 CONTAINS=x")
        .matches_all(&candidates[2], &source)
        .unwrap());
}

#[test]
fn test_dates_range_and_year_equivalence() {
    let source = Contents::default();
    let inside = idea(1, "x", date(2020, 6, 15));
    let outside = idea(2, "x", date(2021, 1, 1));

    let range = query("DATES=[2020-01-01,2020-12-31]");
    let year = query("YEAR=2020");
    assert_eq!(range, year);
    assert!(range.matches_all(&inside, &source).unwrap());
    assert!(!range.matches_all(&outside, &source).unwrap());
    assert!(query("DATE=2021").matches_all(&outside, &source).unwrap());
}

#[test]
fn test_edit_and_consumed_dates() {
    let source = Contents::default();
    let mut consumed = idea(1, "x", date(2020, 1, 1));
    consumed.edited = date(2020, 3, 3);
    consumed.cycle = Cycle::Consumed;
    consumed.consumed = Some(date(2020, 5, 5));
    let alive = idea(2, "x", date(2020, 1, 1));

    assert!(query("EDIT-DATE=2020-03-03").matches_all(&consumed, &source).unwrap());
    assert!(query("CONSUMED-DATES=[2020-05-01,2020-05-31]")
        .matches_all(&consumed, &source)
        .unwrap());
    assert!(!query("CONSUMED-DATE=2020").matches_all(&alive, &source).unwrap());
}

#[test]
fn test_without_array_expands_to_and() {
    let source = Contents::default();
    let q = query("WITHOUT=[done,dropped]");
    assert_eq!(q.predicates().len(), 2);
    assert!(q.matches_all(&idea(1, "todo", date(2024, 1, 1)), &source).unwrap());
    assert!(!q.matches_all(&idea(2, "todo,dropped", date(2024, 1, 1)), &source).unwrap());
    assert!(!q
        .matches_all(&idea(3, "todo,done=yes", date(2024, 1, 1)), &source)
        .unwrap());
}

#[test]
fn test_contains_variants() {
    let source = Contents([(1, "The Quick fox")].into_iter().collect());
    let note = idea(1, "x", date(2024, 1, 1));

    assert!(query("CONTAINS=Quick").matches_all(&note, &source).unwrap());
    assert!(!query("CONTAINS=quick").matches_all(&note, &source).unwrap());
    assert!(query("CONTAINS-CI=quick").matches_all(&note, &source).unwrap());
    assert!(query("NO-CONTAINS=quick").matches_all(&note, &source).unwrap());
    assert!(!query("NO-CONTAINS-CI=quick").matches_all(&note, &source).unwrap());
    // array values are ANDed
    assert!(!query("CONTAINS=[fox,dog]").matches_all(&note, &source).unwrap());
    assert!(query("CONTAINS=[fox,Quick]").matches_all(&note, &source).unwrap());
}

#[test]
fn test_cycle_filters() {
    let source = Contents::default();
    let mut zombie = idea(1, "x", date(2024, 1, 1));
    zombie.cycle = Cycle::Zombie;
    zombie.consumed = Some(date(2024, 2, 1));

    assert!(query("ALL-ZOMBIE").matches_all(&zombie, &source).unwrap());
    assert!(!query("ALL").matches_all(&zombie, &source).unwrap());
    assert!(query("ALL-ZOMBIE").spans_all_cycles());
    assert!(!query("ALL x").spans_all_cycles());
}

#[test]
fn test_keyword_value_errors() {
    let registry = KeywordRegistry::standard();
    assert!(matches!(
        Query::parse(&registry, "ALL=1"),
        Err(QuError::InvalidValue { .. })
    ));
    assert!(matches!(
        Query::parse(&registry, "WITHOUT"),
        Err(QuError::InvalidValue { .. })
    ));
    assert!(Query::parse(&registry, "DATES=soon").is_err());
}

#[test]
fn test_empty_registry_treats_keywords_as_reserved_tags() {
    let err = Query::parse(&KeywordRegistry::empty(), "ALL").unwrap_err();
    assert!(matches!(err, QuError::ReservedKeyword { .. }));
}

#[test]
fn test_custom_registration() {
    fn only_alive(_: &str, _: Option<&str>) -> Result<Vec<Predicate>> {
        Ok(vec![Predicate::Cycle(Cycle::Alive)])
    }
    let mut registry = KeywordRegistry::empty();
    registry.register("LIVE", only_alive);
    assert!(registry.is_registered("LIVE"));

    let q = Query::parse(&registry, "LIVE").unwrap();
    assert_eq!(q.predicates(), &[Predicate::Cycle(Cycle::Alive)]);
}

#[test]
fn test_display_round_trips() {
    let registry = KeywordRegistry::standard();
    let q = query("work WITHOUT=done YEAR=2020 CONTAINS-CI=x ALL-CONSUMED");
    assert_eq!(
        q.to_string(),
        "work,WITHOUT=done,DATES=[2020-01-01,2020-12-31],CONTAINS-CI=x,ALL-CONSUMED"
    );
    assert_eq!(Query::parse(&registry, &q.to_string()).unwrap(), q);
}

#[test]
fn test_empty_query() {
    let source = Contents::default();
    let note = idea(1, "x", date(2024, 1, 1));
    assert!(Query::default().matches_all(&note, &source).unwrap());
    assert!(!Query::default().matches_any(&note, &source).unwrap());
}
