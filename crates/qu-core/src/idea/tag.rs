//! Plain tags carried by an idea
//!
//! A tag is either a bare name (`todo`) or a `name=value` pair
//! (`app=journal`). Tags are written verbatim into filenames, so any
//! character with meaning in the filename grammar is refused up front.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::codec;
use crate::error::{QuError, Result};
use crate::query::keywords;

/// Characters that would break the filename grammar or the query splitter
const FORBIDDEN_CHARS: &[char] = &[',', '.', '/', '\\', '[', ']'];

static PARENT_ID_TOKEN: OnceLock<Regex> = OnceLock::new();

/// Pattern for a parent-id token inside a filename (`c000123`)
pub(crate) fn parent_id_token() -> &'static Regex {
    PARENT_ID_TOKEN.get_or_init(|| Regex::new(r"^c\d{6}$").expect("static pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    value: Option<String>,
}

impl Tag {
    /// Create a bare tag
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Tag { name, value: None })
    }

    /// Create a `name=value` tag
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        validate_name(&name)?;
        validate_text("tag value", &value)?;
        Ok(Tag {
            name,
            value: Some(value),
        })
    }

    /// Parse `name` or `name=value`
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, value)) => Tag::with_value(name, value),
            None => Tag::new(s),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for Tag {
    type Err = QuError;

    fn from_str(s: &str) -> Result<Self> {
        Tag::parse(s)
    }
}

fn validate_name(name: &str) -> Result<()> {
    validate_text("tag name", name)?;
    if keywords::is_reserved(name) {
        return Err(QuError::ReservedKeyword {
            name: name.to_string(),
        });
    }
    if parent_id_token().is_match(name) {
        bail_invalid!(
            "tag name (looks like a parent id)",
            name,
        );
    }
    if name
        .strip_prefix('c')
        .is_some_and(|rest| codec::parse_date(rest).is_ok())
    {
        bail_invalid!(
            "tag name (looks like a consumed date)",
            name,
        );
    }
    Ok(())
}

fn validate_text(context: &str, text: &str) -> Result<()> {
    if text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || FORBIDDEN_CHARS.contains(&c))
    {
        bail_invalid!(context, text);
    }
    Ok(())
}

/// Parse a comma separated list of plain tags (`work,app=journal`)
pub fn parse_tag_list(clumped: &str) -> Result<Vec<Tag>> {
    clumped
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(Tag::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_and_valued() {
        let bare = Tag::parse("todo").unwrap();
        assert_eq!(bare.name(), "todo");
        assert_eq!(bare.value(), None);

        let valued = Tag::parse("app=journal").unwrap();
        assert_eq!(valued.name(), "app");
        assert_eq!(valued.value(), Some("journal"));
        assert_eq!(valued.to_string(), "app=journal");
    }

    #[test]
    fn test_reserved_names_rejected() {
        for name in ["WITHOUT", "CONTAINS", "DATES", "ALL", "ALL-ZOMBIE"] {
            assert!(
                matches!(Tag::new(name), Err(QuError::ReservedKeyword { .. })),
                "{name} should be reserved"
            );
        }
        assert!(matches!(
            Tag::parse("CONTAINS-CI=x"),
            Err(QuError::ReservedKeyword { .. })
        ));
    }

    #[test]
    fn test_grammar_breaking_text_rejected() {
        assert!(Tag::new("").is_err());
        assert!(Tag::new("a,b").is_err());
        assert!(Tag::new("v1.2").is_err());
        assert!(Tag::new("two words").is_err());
        assert!(Tag::new("[x]").is_err());
        assert!(Tag::with_value("due", "").is_err());
    }

    #[test]
    fn test_parent_id_shaped_name_rejected() {
        assert!(Tag::new("c123456").is_err());
        assert!(Tag::new("c12345").is_ok());
        assert!(Tag::new("cat").is_ok());
        assert!(Tag::new("c2024-01-01").is_err());
    }

    #[test]
    fn test_parse_tag_list() {
        let tags = parse_tag_list("work, app=journal,,idea").unwrap();
        let rendered: Vec<String> = tags.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["work", "app=journal", "idea"]);
    }
}
