//! Tag query algebra
//!
//! A query string such as `work,WITHOUT=[done,dropped],DATES=[2020,2021]`
//! parses into a list of [`Predicate`]s. An idea matches a query when
//! every predicate includes it ([`Query::matches_all`]) or, for the
//! any-of form, when at least one does ([`Query::matches_any`]).
//!
//! A bracketed multi-value token expands to one predicate per value, and
//! those predicates are ANDed like any others.

mod date;
pub mod keywords;
mod parse;

use std::fmt;

use crate::error::Result;
use crate::idea::{Cycle, Idea, Tag};

pub use date::{DateField, DateRange};
pub use parse::{split_array, split_clumped, Constructor, KeywordRegistry};

/// Source of an idea's file content, needed by content predicates
pub trait ContentSource {
    fn read_content(&self, idea: &Idea) -> Result<Vec<u8>>;
}

/// Substring test against an idea's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMatch {
    pub needle: String,
    pub negate: bool,
    pub case_insensitive: bool,
}

impl ContentMatch {
    fn test(&self, content: &str) -> bool {
        let found = if self.case_insensitive {
            content
                .to_lowercase()
                .contains(&self.needle.to_lowercase())
        } else {
            content.contains(&self.needle)
        };
        found != self.negate
    }
}

/// Date range test against one of an idea's dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub field: DateField,
    pub range: DateRange,
}

/// One evaluated query term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Idea carries this exact (name, value) pair
    Plain(Tag),
    /// Idea carries no tag with this name
    Without(String),
    /// Idea is in this lifecycle state
    Cycle(Cycle),
    /// Idea content contains (or lacks) a substring
    Contains(ContentMatch),
    /// One of the idea's dates falls in a range
    Date(DateMatch),
}

impl Predicate {
    /// Evaluate against an idea, reading content only if needed
    pub fn includes(&self, idea: &Idea, source: &dyn ContentSource) -> Result<bool> {
        let mut content = LazyContent::new(source);
        self.includes_with(idea, &mut content)
    }

    fn includes_with(&self, idea: &Idea, content: &mut LazyContent<'_>) -> Result<bool> {
        Ok(match self {
            Predicate::Plain(tag) => idea.has_tag(tag),
            Predicate::Without(name) => !idea.has_tag_named(name),
            Predicate::Cycle(cycle) => idea.cycle == *cycle,
            Predicate::Contains(m) => m.test(content.get(idea)?),
            Predicate::Date(m) => m.field.of(idea).is_some_and(|d| m.range.contains(d)),
        })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Plain(tag) => write!(f, "{tag}"),
            Predicate::Without(name) => write!(f, "{}={name}", keywords::WITHOUT),
            Predicate::Cycle(Cycle::Alive) => write!(f, "{}", keywords::ALL),
            Predicate::Cycle(Cycle::Consumed) => write!(f, "{}", keywords::ALL_CONSUMED),
            Predicate::Cycle(Cycle::Zombie) => write!(f, "{}", keywords::ALL_ZOMBIE),
            Predicate::Contains(m) => {
                let keyword = match (m.negate, m.case_insensitive) {
                    (false, false) => keywords::CONTAINS,
                    (false, true) => keywords::CONTAINS_CI,
                    (true, false) => keywords::NO_CONTAINS,
                    (true, true) => keywords::NO_CONTAINS_CI,
                };
                write!(f, "{keyword}={}", m.needle)
            }
            Predicate::Date(m) => {
                let keyword = match m.field {
                    DateField::Created => keywords::DATES,
                    DateField::Edited => keywords::EDIT_DATES,
                    DateField::Consumed => keywords::CONSUMED_DATES,
                };
                write!(f, "{keyword}=[{},{}]", m.range.start, m.range.end)
            }
        }
    }
}

/// Content read at most once per idea evaluation
struct LazyContent<'a> {
    source: &'a dyn ContentSource,
    text: Option<String>,
}

impl<'a> LazyContent<'a> {
    fn new(source: &'a dyn ContentSource) -> Self {
        LazyContent { source, text: None }
    }

    fn get(&mut self, idea: &Idea) -> Result<&str> {
        if self.text.is_none() {
            let bytes = self.source.read_content(idea)?;
            self.text = Some(String::from_utf8_lossy(&bytes).into_owned());
        }
        Ok(self.text.as_deref().unwrap_or_default())
    }
}

/// A parsed query: an ordered list of predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    predicates: Vec<Predicate>,
}

impl Query {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Query { predicates }
    }

    /// Parse a clumped query string with the given keyword registry
    pub fn parse(registry: &KeywordRegistry, clumped: &str) -> Result<Self> {
        registry.parse_clumped(clumped)
    }

    /// Query matching ideas that carry all of these plain tags
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Query::new(tags.into_iter().map(Predicate::Plain).collect())
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Plain tags named by the query
    pub fn plain_tags(&self) -> impl Iterator<Item = &Tag> {
        self.predicates.iter().filter_map(|p| match p {
            Predicate::Plain(tag) => Some(tag),
            _ => None,
        })
    }

    /// Whether the query asks for ideas outside the alive state, so the
    /// candidate listing must include every cycle
    pub fn spans_all_cycles(&self) -> bool {
        self.predicates
            .iter()
            .any(|p| matches!(p, Predicate::Cycle(c) if !c.is_alive()))
    }

    /// AND of every predicate (true for an empty query)
    pub fn matches_all(&self, idea: &Idea, source: &dyn ContentSource) -> Result<bool> {
        let mut content = LazyContent::new(source);
        for predicate in &self.predicates {
            if !predicate.includes_with(idea, &mut content)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// OR of every predicate (false for an empty query)
    pub fn matches_any(&self, idea: &Idea, source: &dyn ContentSource) -> Result<bool> {
        let mut content = LazyContent::new(source);
        for predicate in &self.predicates {
            if predicate.includes_with(idea, &mut content)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.predicates.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests;
