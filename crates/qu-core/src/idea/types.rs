//! Scalar types carried by every idea: id, lifecycle state and kind

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::{QuError, Result};

/// Monotonically assigned idea identifier
///
/// Serialized as six zero-padded decimal digits (`000042`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(u32);

impl IdeaId {
    /// Number of digits used when an id is written into a filename
    pub const WIDTH: usize = 6;

    /// Largest id that fits in [`IdeaId::WIDTH`] digits
    pub const MAX: IdeaId = IdeaId(999_999);

    pub fn new(raw: u32) -> Self {
        IdeaId(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The id following this one, if it still fits in six digits
    pub fn next(self) -> Option<Self> {
        (self < Self::MAX).then_some(IdeaId(self.0 + 1))
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = Self::WIDTH)
    }
}

impl FromStr for IdeaId {
    type Err = QuError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.len() > Self::WIDTH
            || !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            bail_invalid!("id", s);
        }
        trimmed
            .parse::<u32>()
            .map(IdeaId)
            .map_err(|_| QuError::invalid_value("id", s))
    }
}

/// Lifecycle state of an idea
///
/// The derived ordering is the only permitted direction of travel:
/// Alive < Consumed < Zombie.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    #[default]
    Alive,
    Consumed,
    Zombie,
}

impl Cycle {
    /// Filename prefix letter
    pub fn prefix(self) -> &'static str {
        match self {
            Cycle::Alive => "a",
            Cycle::Consumed => "c",
            Cycle::Zombie => "z",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "a" => Some(Cycle::Alive),
            "c" => Some(Cycle::Consumed),
            "z" => Some(Cycle::Zombie),
            _ => None,
        }
    }

    pub fn is_alive(self) -> bool {
        self == Cycle::Alive
    }

    /// Whether moving from `self` to `next` respects the forward-only order
    pub fn can_advance_to(self, next: Cycle) -> bool {
        next > self
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cycle::Alive => "alive",
            Cycle::Consumed => "consumed",
            Cycle::Zombie => "zombie",
        };
        write!(f, "{s}")
    }
}

/// Kind of content held by an idea, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Text,
    Image,
    Audio,
    EncryptedText,
}

impl Kind {
    /// Extension appended when an idea is marked as encrypted
    pub const ENCRYPTED_EXTENSION: &'static str = ".en";

    /// Map a raw extension (including the leading dot) to a kind
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            "" | ".txt" => Ok(Kind::Text),
            ".jpg" | ".jpeg" | ".tiff" | ".png" => Ok(Kind::Image),
            ".mp3" | ".wav" => Ok(Kind::Audio),
            Self::ENCRYPTED_EXTENSION => Ok(Kind::EncryptedText),
            other => Err(QuError::invalid_value("file extension", other)),
        }
    }
}

/// Split a filename into (stem, extension) the way a path extension is
/// usually taken: the extension starts at the final dot, if any.
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) => filename.split_at(idx),
        None => (filename, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_zero_padded() {
        assert_eq!(IdeaId::new(5).to_string(), "000005");
        assert_eq!(IdeaId::new(123456).to_string(), "123456");
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("000042".parse::<IdeaId>().unwrap(), IdeaId::new(42));
        assert_eq!("7".parse::<IdeaId>().unwrap(), IdeaId::new(7));
        assert!("abc".parse::<IdeaId>().is_err());
        assert!("-3".parse::<IdeaId>().is_err());
        assert!("".parse::<IdeaId>().is_err());
        assert!("1000000".parse::<IdeaId>().is_err());
    }

    #[test]
    fn test_next_stops_at_six_digits() {
        assert_eq!(IdeaId::new(999_998).next(), Some(IdeaId::MAX));
        assert_eq!(IdeaId::MAX.next(), None);
    }

    #[test]
    fn test_cycle_prefix_round_trip() {
        for cycle in [Cycle::Alive, Cycle::Consumed, Cycle::Zombie] {
            assert_eq!(Cycle::from_prefix(cycle.prefix()), Some(cycle));
        }
        assert_eq!(Cycle::from_prefix("x"), None);
    }

    #[test]
    fn test_cycle_only_advances() {
        assert!(Cycle::Alive.can_advance_to(Cycle::Consumed));
        assert!(Cycle::Consumed.can_advance_to(Cycle::Zombie));
        assert!(Cycle::Alive.can_advance_to(Cycle::Zombie));
        assert!(!Cycle::Consumed.can_advance_to(Cycle::Alive));
        assert!(!Cycle::Zombie.can_advance_to(Cycle::Consumed));
        assert!(!Cycle::Consumed.can_advance_to(Cycle::Consumed));
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(Kind::from_extension("").unwrap(), Kind::Text);
        assert_eq!(Kind::from_extension(".txt").unwrap(), Kind::Text);
        assert_eq!(Kind::from_extension(".png").unwrap(), Kind::Image);
        assert_eq!(Kind::from_extension(".wav").unwrap(), Kind::Audio);
        assert_eq!(Kind::from_extension(".en").unwrap(), Kind::EncryptedText);
        assert!(Kind::from_extension(".docx").is_err());
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a,000001,tag.png"), ("a,000001,tag", ".png"));
        assert_eq!(split_extension("a,000001,tag"), ("a,000001,tag", ""));
    }
}
