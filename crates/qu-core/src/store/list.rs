//! Listing, filtering and id resolution

use std::collections::BTreeSet;
use std::time::Instant;

use walkdir::WalkDir;

use crate::codec;
use crate::error::{QuError, Result};
use crate::idea::{Idea, IdeaId, Tag};
use crate::query::{ContentSource, Query};
use crate::trace_time;

use super::Store;

/// An ordered collection of ideas, sorted by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ideas(Vec<Idea>);

impl Ideas {
    pub fn new(mut ideas: Vec<Idea>) -> Self {
        ideas.sort_by_key(|idea| idea.id);
        Ideas(ideas)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Idea> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Idea] {
        &self.0
    }

    /// Ideas matching every predicate of the query
    pub fn with_tags(self, query: &Query, source: &dyn ContentSource) -> Result<Self> {
        self.try_filter(|idea| query.matches_all(idea, source))
    }

    /// Ideas matching at least one predicate of the query
    pub fn with_any_of_tags(self, query: &Query, source: &dyn ContentSource) -> Result<Self> {
        self.try_filter(|idea| query.matches_any(idea, source))
    }

    pub fn with_text(self) -> Self {
        self.filter(Idea::is_text)
    }

    pub fn with_image(self) -> Self {
        self.filter(Idea::is_image)
    }

    /// Ideas whose id lies in `start..=end`
    pub fn in_range(self, start: IdeaId, end: IdeaId) -> Self {
        self.filter(|idea| (start..=end).contains(&idea.id))
    }

    /// Every distinct tag, sorted
    pub fn unique_tags(&self) -> BTreeSet<Tag> {
        self.0.iter().flat_map(|idea| idea.tags.iter().cloned()).collect()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.0.iter().map(Idea::filename).collect()
    }

    fn filter(self, keep: impl Fn(&Idea) -> bool) -> Self {
        Ideas(self.0.into_iter().filter(|idea| keep(idea)).collect())
    }

    fn try_filter(self, mut keep: impl FnMut(&Idea) -> Result<bool>) -> Result<Self> {
        let mut kept = Vec::with_capacity(self.0.len());
        for idea in self.0 {
            if keep(&idea)? {
                kept.push(idea);
            }
        }
        Ok(Ideas(kept))
    }
}

impl IntoIterator for Ideas {
    type Item = Idea;
    type IntoIter = std::vec::IntoIter<Idea>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ideas {
    type Item = &'a Idea;
    type IntoIter = std::slice::Iter<'a, Idea>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Store {
    /// Filenames in the ideas directory, editor artifacts excluded
    fn entry_names(&self) -> Result<Vec<String>> {
        let dir = self.ideas_dir();
        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| QuError::io_operation("list", dir.display(), e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                return Err(QuError::malformed(
                    &entry.file_name().to_string_lossy(),
                    "filename is not UTF-8",
                ));
            };
            if self.config.is_artifact(name) {
                continue;
            }
            names.push(name.to_string());
        }
        Ok(names)
    }

    /// Every idea in the store. A malformed filename fails the listing.
    #[tracing::instrument(skip(self))]
    pub fn list_all(&self) -> Result<Ideas> {
        let start = Instant::now();
        let ideas = self
            .entry_names()?
            .iter()
            .map(|name| codec::decode(name))
            .collect::<Result<Vec<_>>>()?;
        trace_time!(start, "list_all", count = ideas.len());
        Ok(Ideas::new(ideas))
    }

    /// Alive ideas only
    pub fn list_alive(&self) -> Result<Ideas> {
        Ok(Ideas::new(
            self.list_all()?
                .into_iter()
                .filter(|idea| idea.cycle.is_alive())
                .collect(),
        ))
    }

    /// Ideas matching every predicate of `query`. Alive ideas only, unless
    /// the query asks for consumed or zombie ideas.
    pub fn find(&self, query: &Query) -> Result<Ideas> {
        let base = if query.spans_all_cycles() {
            self.list_all()?
        } else {
            self.list_alive()?
        };
        base.with_tags(query, self)
    }

    /// Ideas matching any predicate of `query`, drawn from alive ideas
    pub fn find_any(&self, query: &Query) -> Result<Ideas> {
        let base = if query.spans_all_cycles() {
            self.list_all()?
        } else {
            self.list_alive()?
        };
        base.with_any_of_tags(query, self)
    }

    /// Parse and run a clumped query
    pub fn find_str(&self, clumped: &str) -> Result<Ideas> {
        let query = Query::parse(&self.registry, clumped)?;
        self.find(&query)
    }

    /// Filename of the idea with this id, by linear scan
    pub fn resolve_filename(&self, id: IdeaId) -> Result<String> {
        for name in self.entry_names()? {
            if codec::id_of(&name)? == id {
                return Ok(name);
            }
        }
        Err(QuError::unknown_id(id))
    }

    /// The idea with this id
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn resolve(&self, id: IdeaId) -> Result<Idea> {
        codec::decode(&self.resolve_filename(id)?)
    }
}
