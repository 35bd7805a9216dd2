//! Command-line idea selectors
//!
//! An argument naming ideas is one of: an id (`42`), a recency keyword
//! (`last`, `last3`), an inclusive id range (`12-40`), or a clumped tag
//! query.

use crate::error::{QuError, Result};
use crate::idea::{Idea, IdeaId};
use crate::query::{KeywordRegistry, Query};
use crate::recency;
use crate::store::{Ideas, Store};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(IdeaId),
    /// Zero-based offset into the recency cache
    Recent(usize),
    Range(IdeaId, IdeaId),
    Query(Query),
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

impl Selector {
    pub fn parse(arg: &str, registry: &KeywordRegistry) -> Result<Self> {
        let arg = arg.trim();
        if is_digits(arg) {
            return Ok(Selector::Id(arg.parse()?));
        }
        if let Some(offset) = recency::parse_last(arg) {
            return Ok(Selector::Recent(offset));
        }
        if let Some((start, end)) = arg.split_once('-') {
            if is_digits(start) && is_digits(end) {
                let (start, end): (IdeaId, IdeaId) = (start.parse()?, end.parse()?);
                if start > end {
                    return Err(QuError::invalid_value("id range", arg));
                }
                return Ok(Selector::Range(start, end));
            }
        }
        Ok(Selector::Query(Query::parse(registry, arg)?))
    }

    /// Whether this selector names exactly one idea
    pub fn is_single(&self) -> bool {
        matches!(self, Selector::Id(_) | Selector::Recent(_))
    }
}

impl Store {
    /// Parse an id or recency keyword. Unless `record` is false the
    /// result is pushed onto the recency cache.
    pub fn parse_id(&self, token: &str, record: bool) -> Result<IdeaId> {
        let token = token.trim();
        let id = if recency::parse_last(token).is_some() {
            self.recency().lookup(token)?
        } else {
            token.parse::<IdeaId>()?
        };
        if record {
            self.recency().record(id)?;
        }
        Ok(id)
    }

    /// Resolve an id or recency keyword to an idea and remember it
    pub fn resolve_token(&self, token: &str) -> Result<Idea> {
        let id = self.parse_id(token, false)?;
        let idea = self.resolve(id)?;
        self.recency().record(id)?;
        Ok(idea)
    }

    /// Ideas named by a selector. Single-idea selectors are remembered in
    /// the recency cache.
    pub fn select(&self, selector: &Selector) -> Result<Ideas> {
        let single = |id: IdeaId| -> Result<Ideas> {
            let idea = self.resolve(id)?;
            self.recency().record(id)?;
            Ok(Ideas::new(vec![idea]))
        };
        match selector {
            Selector::Id(id) => single(*id),
            Selector::Recent(offset) => {
                let id = self
                    .recency()
                    .load()?
                    .get(*offset)
                    .copied()
                    .ok_or_else(|| QuError::unknown_id(format!("{}{}", recency::LAST, offset + 1)))?;
                single(id)
            }
            Selector::Range(start, end) => Ok(self.list_all()?.in_range(*start, *end)),
            Selector::Query(query) => self.find(query),
        }
    }

    /// Parse and apply a selector argument
    pub fn select_str(&self, arg: &str) -> Result<Ideas> {
        let selector = Selector::parse(arg, self.registry())?;
        self.select(&selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idea::parse_tag_list;
    use tempfile::tempdir;

    #[test]
    fn test_parse_forms() {
        let registry = KeywordRegistry::standard();
        assert_eq!(
            Selector::parse("42", &registry).unwrap(),
            Selector::Id(IdeaId::new(42))
        );
        assert_eq!(Selector::parse("last", &registry).unwrap(), Selector::Recent(0));
        assert_eq!(Selector::parse("last4", &registry).unwrap(), Selector::Recent(3));
        assert_eq!(
            Selector::parse("12-40", &registry).unwrap(),
            Selector::Range(IdeaId::new(12), IdeaId::new(40))
        );
        assert!(matches!(
            Selector::parse("work-log,todo", &registry).unwrap(),
            Selector::Query(_)
        ));
        assert!(Selector::parse("40-12", &registry).is_err());
    }

    #[test]
    fn test_resolution_feeds_recency() {
        let dir = tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        let a = store.create(parse_tag_list("a").unwrap(), "a").unwrap();
        let b = store.create(parse_tag_list("b").unwrap(), "b").unwrap();

        store.select_str(&a.id.get().to_string()).unwrap();
        store.resolve_token(&b.id.to_string()).unwrap();
        assert_eq!(store.parse_id("last", false).unwrap(), b.id);
        assert_eq!(store.parse_id("last2", false).unwrap(), a.id);

        let picked = store.select_str("last2").unwrap();
        assert_eq!(picked.filenames(), vec![a.filename()]);
        assert_eq!(store.parse_id("last", false).unwrap(), a.id);
    }

    #[test]
    fn test_suppressed_recording() {
        let dir = tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        store.parse_id("7", false).unwrap();
        assert!(store.recency().load().unwrap().is_empty());
        store.parse_id("7", true).unwrap();
        assert_eq!(store.recency().load().unwrap(), vec![IdeaId::new(7)]);
    }

    #[test]
    fn test_range_and_query_select() {
        let dir = tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        for tags in ["x", "y", "x,y"] {
            store.create(parse_tag_list(tags).unwrap(), "").unwrap();
        }
        assert_eq!(store.select_str("2-3").unwrap().len(), 2);
        assert_eq!(store.select_str("x").unwrap().len(), 2);
        assert_eq!(store.select_str("x,WITHOUT=y").unwrap().len(), 1);
    }
}
