//! Recently resolved ids
//!
//! A short most-recent-first list persisted one id per line, used to
//! resolve `last`, `last1` .. `last9`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{QuError, Result};
use crate::idea::IdeaId;
use crate::map_io_err;

/// Number of ids kept
pub const CAPACITY: usize = 9;

/// Keyword prefix for recency lookups
pub const LAST: &str = "last";

#[derive(Debug, Clone)]
pub struct RecencyCache {
    path: PathBuf,
}

impl RecencyCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecencyCache { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached ids, most recent first. A missing file is an empty cache.
    pub fn load(&self) -> Result<Vec<IdeaId>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(map_io_err!("read recency", self.path))?;
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::parse::<IdeaId>)
            .collect()
    }

    /// Put `id` at the front, dropping an immediate repeat and anything
    /// past capacity
    pub fn record(&self, id: IdeaId) -> Result<()> {
        let mut ids = self.load()?;
        if ids.first() == Some(&id) {
            return Ok(());
        }
        ids.insert(0, id);
        ids.truncate(CAPACITY);

        let body: String = ids.iter().map(|id| format!("{id}\n")).collect();
        fs::write(&self.path, body).map_err(map_io_err!("write recency", self.path))?;
        tracing::trace!(%id, "recorded recent id");
        Ok(())
    }

    /// Resolve `last` / `lastN` (1-based) against the cache
    pub fn lookup(&self, token: &str) -> Result<IdeaId> {
        let offset = parse_last(token).ok_or_else(|| QuError::invalid_value("recency", token))?;
        self.load()?
            .get(offset)
            .copied()
            .ok_or_else(|| QuError::unknown_id(token))
    }
}

/// Zero-based cache offset for `last` / `lastN`, or None if `token` is not
/// a recency keyword
pub fn parse_last(token: &str) -> Option<usize> {
    let rest = token.strip_prefix(LAST)?;
    if rest.is_empty() {
        return Some(0);
    }
    match rest.parse::<usize>() {
        Ok(n) if (1..=CAPACITY).contains(&n) => Some(n - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cache() -> (tempfile::TempDir, RecencyCache) {
        let dir = tempdir().unwrap();
        let cache = RecencyCache::new(dir.path().join("last"));
        (dir, cache)
    }

    #[test]
    fn test_parse_last() {
        assert_eq!(parse_last("last"), Some(0));
        assert_eq!(parse_last("last1"), Some(0));
        assert_eq!(parse_last("last9"), Some(8));
        assert_eq!(parse_last("last10"), None);
        assert_eq!(parse_last("last0"), None);
        assert_eq!(parse_last("lastly"), None);
        assert_eq!(parse_last("12"), None);
    }

    #[test]
    fn test_record_most_recent_first() {
        let (_dir, cache) = cache();
        cache.record(IdeaId::new(1)).unwrap();
        cache.record(IdeaId::new(2)).unwrap();
        cache.record(IdeaId::new(2)).unwrap();

        assert_eq!(cache.load().unwrap(), vec![IdeaId::new(2), IdeaId::new(1)]);
        assert_eq!(cache.lookup("last").unwrap(), IdeaId::new(2));
        assert_eq!(cache.lookup("last2").unwrap(), IdeaId::new(1));
    }

    #[test]
    fn test_capacity_truncates() {
        let (_dir, cache) = cache();
        for n in 1..=12 {
            cache.record(IdeaId::new(n)).unwrap();
        }
        let ids = cache.load().unwrap();
        assert_eq!(ids.len(), CAPACITY);
        assert_eq!(ids[0], IdeaId::new(12));
        assert_eq!(ids[CAPACITY - 1], IdeaId::new(4));
    }

    #[test]
    fn test_empty_cache_is_unknown_id() {
        let (_dir, cache) = cache();
        assert!(matches!(
            cache.lookup("last"),
            Err(QuError::UnknownId { .. })
        ));
        cache.record(IdeaId::new(5)).unwrap();
        assert!(matches!(
            cache.lookup("last3"),
            Err(QuError::UnknownId { .. })
        ));
    }
}
