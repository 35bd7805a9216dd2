//! The idea record
//!
//! An idea is one captured note, image or audio clip. Every field of the
//! record is serialized into the idea's filename (see [`crate::codec`]);
//! there is no other metadata store.

mod tag;
mod types;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{QuError, Result};

pub(crate) use tag::parent_id_token;
pub use tag::{parse_tag_list, Tag};
pub use types::{split_extension, Cycle, IdeaId, Kind};

/// Calendar date used for new ideas and edit stamps
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub cycle: Cycle,
    /// Parent ideas this one was derived from, in recorded order
    pub consumes: Vec<IdeaId>,
    pub kind: Kind,
    /// Raw extension including the dot, empty for plain text
    pub extension: String,
    pub created: NaiveDate,
    pub edited: NaiveDate,
    /// Set once the idea leaves the Alive state
    pub consumed: Option<NaiveDate>,
    pub tags: Vec<Tag>,
}

impl Idea {
    /// A new alive text idea created on `date`
    pub fn new_text(id: IdeaId, tags: Vec<Tag>, date: NaiveDate) -> Self {
        Idea {
            id,
            cycle: Cycle::Alive,
            consumes: Vec::new(),
            kind: Kind::Text,
            extension: String::new(),
            created: date,
            edited: date,
            consumed: None,
            tags,
        }
    }

    /// A new alive idea whose kind is taken from `extension`
    pub fn with_extension(
        id: IdeaId,
        tags: Vec<Tag>,
        extension: &str,
        date: NaiveDate,
    ) -> Result<Self> {
        let kind = Kind::from_extension(extension)?;
        Ok(Idea {
            kind,
            extension: extension.to_string(),
            ..Idea::new_text(id, tags, date)
        })
    }

    /// A new alive text idea that consumes `parent`, inheriting its
    /// lineage and tags
    pub fn consuming(parent: &Idea, id: IdeaId, date: NaiveDate) -> Self {
        let mut consumes = parent.consumes.clone();
        consumes.push(parent.id);
        Idea {
            consumes,
            ..Idea::new_text(id, parent.tags.clone(), date)
        }
    }

    /// Canonical filename for this record
    pub fn filename(&self) -> String {
        codec::encode(self)
    }

    pub fn is_text(&self) -> bool {
        self.kind == Kind::Text
    }

    pub fn is_image(&self) -> bool {
        self.kind == Kind::Image
    }

    /// Whether the idea carries exactly this (name, value) pair
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the idea carries any tag with this name, regardless of value
    pub fn has_tag_named(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name() == name)
    }

    /// Append tags not already present
    pub fn add_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        for tag in tags {
            if !self.has_tag(&tag) {
                self.tags.push(tag);
            }
        }
    }

    /// Remove the given tags. Removing the final tag is refused and leaves
    /// the idea untouched.
    pub fn remove_tags(&mut self, to_remove: &[Tag]) -> Result<()> {
        let remaining: Vec<Tag> = self
            .tags
            .iter()
            .filter(|t| !to_remove.contains(t))
            .cloned()
            .collect();
        if remaining.is_empty() {
            return Err(QuError::InvalidTagRemoval {
                filename: self.filename(),
            });
        }
        self.tags = remaining;
        Ok(())
    }

    /// Replace the first occurrence of `from` with `to`. Returns whether a
    /// replacement happened.
    pub fn rename_tag(&mut self, from: &Tag, to: &Tag) -> bool {
        let Some(idx) = self.tags.iter().position(|t| t == from) else {
            return false;
        };
        if self.has_tag(to) {
            self.tags.remove(idx);
        } else {
            self.tags[idx] = to.clone();
        }
        true
    }

    /// Tags joined the way they are written in a filename
    pub fn clumped_tags(&self) -> String {
        self.tags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}
