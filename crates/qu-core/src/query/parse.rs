//! Query string parsing and keyword dispatch

use std::collections::HashMap;

use crate::bail_invalid;
use crate::error::{QuError, Result};
use crate::idea::{Cycle, Tag};

use super::keywords;
use super::{ContentMatch, DateField, DateMatch, DateRange, Predicate, Query};

/// Builds predicates for a keyword family from `(keyword, value)`
pub type Constructor = fn(&str, Option<&str>) -> Result<Vec<Predicate>>;

/// Maps reserved keywords to the family that parses them
///
/// Built once by the caller and passed to every parse; nothing global is
/// mutated.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    families: HashMap<String, Constructor>,
}

impl KeywordRegistry {
    /// A registry with no keywords: every token parses as a plain tag
    pub fn empty() -> Self {
        Self::default()
    }

    /// The full set of query keywords
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(keywords::WITHOUT, without);
        for keyword in [
            keywords::CONTAINS,
            keywords::CONTAINS_CI,
            keywords::NO_CONTAINS,
            keywords::NO_CONTAINS_CI,
        ] {
            registry.register(keyword, contains);
        }
        for keyword in [
            keywords::DATE,
            keywords::DATES,
            keywords::YEAR,
            keywords::EDIT_DATE,
            keywords::EDIT_DATES,
            keywords::CONSUMED_DATE,
            keywords::CONSUMED_DATES,
        ] {
            registry.register(keyword, dates);
        }
        for keyword in [keywords::ALL, keywords::ALL_CONSUMED, keywords::ALL_ZOMBIE] {
            registry.register(keyword, cycle);
        }
        registry
    }

    pub fn register(&mut self, keyword: &str, constructor: Constructor) {
        self.families.insert(keyword.to_string(), constructor);
    }

    pub fn is_registered(&self, keyword: &str) -> bool {
        self.families.contains_key(keyword)
    }

    /// Parse one token into the predicates it expands to
    pub fn parse_token(&self, token: &str) -> Result<Vec<Predicate>> {
        let (keyword, value) = match token.split_once('=') {
            Some((keyword, value)) => (keyword, Some(value)),
            None => (token, None),
        };
        match self.families.get(keyword) {
            Some(constructor) => constructor(keyword, value),
            None => Ok(vec![Predicate::Plain(Tag::parse(token)?)]),
        }
    }

    /// Parse a clumped query string
    pub fn parse_clumped(&self, clumped: &str) -> Result<Query> {
        let mut predicates = Vec::new();
        for token in split_clumped(clumped) {
            predicates.extend(self.parse_token(&token)?);
        }
        Ok(Query::new(predicates))
    }
}

/// Split on commas and whitespace that are not inside `[...]`
pub fn split_clumped(clumped: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in clumped.chars() {
        match ch {
            '[' => {
                depth += 1;
                current.push(ch);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if depth == 0 && (c == ',' || c.is_whitespace()) => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Split a `[a,b,c]` array value; anything else is a single value
pub fn split_array(value: &str) -> Vec<&str> {
    match value
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
    {
        Some(inner) if !inner.is_empty() => inner.split(',').map(str::trim).collect(),
        _ => vec![value],
    }
}

fn require_value<'a>(keyword: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(QuError::invalid_value(
            "query",
            format!("{keyword} requires a value"),
        )),
    }
}

fn without(keyword: &str, value: Option<&str>) -> Result<Vec<Predicate>> {
    let value = require_value(keyword, value)?;
    Ok(split_array(value)
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| Predicate::Without(name.to_string()))
        .collect())
}

fn contains(keyword: &str, value: Option<&str>) -> Result<Vec<Predicate>> {
    let value = require_value(keyword, value)?;
    let (negate, case_insensitive) = match keyword {
        keywords::CONTAINS => (false, false),
        keywords::CONTAINS_CI => (false, true),
        keywords::NO_CONTAINS => (true, false),
        keywords::NO_CONTAINS_CI => (true, true),
        other => bail_invalid!("contains keyword", other),
    };
    Ok(split_array(value)
        .into_iter()
        .filter(|needle| !needle.is_empty())
        .map(|needle| {
            Predicate::Contains(ContentMatch {
                needle: needle.to_string(),
                negate,
                case_insensitive,
            })
        })
        .collect())
}

fn dates(keyword: &str, value: Option<&str>) -> Result<Vec<Predicate>> {
    let value = require_value(keyword, value)?;
    let field = match keyword {
        keywords::DATE | keywords::DATES | keywords::YEAR => DateField::Created,
        keywords::EDIT_DATE | keywords::EDIT_DATES => DateField::Edited,
        keywords::CONSUMED_DATE | keywords::CONSUMED_DATES => DateField::Consumed,
        other => bail_invalid!("date keyword", other),
    };
    Ok(vec![Predicate::Date(DateMatch {
        field,
        range: DateRange::parse(value)?,
    })])
}

fn cycle(keyword: &str, value: Option<&str>) -> Result<Vec<Predicate>> {
    if value.is_some() {
        bail_invalid!(
            "query",
            format!("{keyword} takes no value"),
        );
    }
    let cycle = match keyword {
        keywords::ALL => Cycle::Alive,
        keywords::ALL_CONSUMED => Cycle::Consumed,
        keywords::ALL_ZOMBIE => Cycle::Zombie,
        other => bail_invalid!("cycle keyword", other),
    };
    Ok(vec![Predicate::Cycle(cycle)])
}
