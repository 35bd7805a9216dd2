//! Creating, renaming and removing ideas
//!
//! Every metadata change is persisted the same way: re-serialize the
//! filename and rename the old file onto it.

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{QuError, Result};
use crate::idea::{parse_tag_list, today, Idea, IdeaId, Kind, Tag};
use crate::map_io_err;
use crate::query::Query;

use super::Store;

/// Placeholder in an import tag list that becomes the source file stem
pub const FILENAME_MARKER: &str = "FILENAME";

impl Store {
    /// Mint an id, build the idea with it, write `content`, then commit
    /// the id
    pub fn mint(
        &self,
        build: impl FnOnce(IdeaId) -> Result<Idea>,
        content: &[u8],
    ) -> Result<Idea> {
        let id = self.allocator.next_id()?;
        let idea = build(id)?;
        let path = self.path_of(&idea);
        fs::write(&path, content).map_err(map_io_err!("write idea", path))?;
        self.allocator.increment()?;
        tracing::debug!(filename = %idea.filename(), "created idea");
        Ok(idea)
    }

    /// Create a new alive text idea
    #[tracing::instrument(skip(self, content))]
    pub fn create(&self, tags: Vec<Tag>, content: &str) -> Result<Idea> {
        if tags.is_empty() {
            bail_invalid!("tags", "an idea needs at least one tag");
        }
        self.mint(|id| Ok(Idea::new_text(id, tags, today())), content.as_bytes())
    }

    /// Create an idea from a copy of an external file. Kind comes from the
    /// source extension; a `FILENAME` tag becomes the source file stem.
    #[tracing::instrument(skip(self, source), fields(source = %source.display()))]
    pub fn import_file(&self, clumped_tags: &str, source: &Path) -> Result<Idea> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| QuError::invalid_value("import source", source.display()))?;
        let tag_stem: String = stem
            .chars()
            .map(|c| {
                if c.is_whitespace() || matches!(c, ',' | '.' | '/' | '\\' | '[' | ']') {
                    '-'
                } else {
                    c
                }
            })
            .collect();
        let tags = parse_tag_list(&clumped_tags.replace(FILENAME_MARKER, &tag_stem))?;
        if tags.is_empty() {
            bail_invalid!("tags", "an idea needs at least one tag");
        }
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        let content = fs::read(source).map_err(map_io_err!("read import", source))?;
        self.mint(
            |id| Idea::with_extension(id, tags, &extension, today()),
            &content,
        )
    }

    /// Duplicate an idea under a fresh id
    pub fn copy(&self, id: IdeaId) -> Result<Idea> {
        let original = self.resolve(id)?;
        let content = self.read_bytes(&original)?;
        let date = today();
        self.mint(
            |new_id| {
                Ok(Idea {
                    id: new_id,
                    created: date,
                    edited: date,
                    ..original.clone()
                })
            },
            &content,
        )
    }

    /// Overwrite an idea's content in place
    pub fn write_content(&self, idea: &Idea, content: &[u8]) -> Result<()> {
        let path = self.path_of(idea);
        fs::write(&path, content).map_err(map_io_err!("write idea", path))?;
        tracing::debug!(filename = %idea.filename(), "wrote content");
        Ok(())
    }

    /// Move the file of `old_filename` onto the filename of `idea`
    pub fn rename(&self, old_filename: &str, idea: &Idea) -> Result<()> {
        let new_filename = idea.filename();
        if new_filename == old_filename {
            return Ok(());
        }
        let from = self.ideas_dir().join(old_filename);
        let to = self.ideas_dir().join(&new_filename);
        fs::rename(&from, &to).map_err(map_io_err!("rename idea", from))?;
        tracing::debug!(from = %old_filename, to = %new_filename, "renamed idea");
        Ok(())
    }

    /// Apply `change` to an idea and persist it by rename. The idea is
    /// left untouched on disk if `change` fails.
    pub fn update_idea(
        &self,
        idea: &mut Idea,
        change: impl FnOnce(&mut Idea) -> Result<()>,
    ) -> Result<()> {
        let old_filename = idea.filename();
        change(idea)?;
        self.rename(&old_filename, idea)
    }

    /// Resolve, change and persist the idea with this id
    pub fn update(
        &self,
        id: IdeaId,
        change: impl FnOnce(&mut Idea) -> Result<()>,
    ) -> Result<Idea> {
        let mut idea = self.resolve(id)?;
        self.update_idea(&mut idea, change)?;
        Ok(idea)
    }

    /// Stamp today's edit date
    pub fn touch_edited(&self, idea: &mut Idea) -> Result<()> {
        self.update_idea(idea, |idea| {
            idea.edited = today();
            Ok(())
        })
    }

    /// Mark a text idea as encrypted. Its extension becomes `.en`.
    pub fn mark_encrypted(&self, id: IdeaId) -> Result<Idea> {
        self.update(id, |idea| {
            if idea.kind == Kind::EncryptedText {
                return Ok(());
            }
            if !idea.is_text() {
                bail_invalid!(
                    "encrypt",
                    format!("{} is not a text idea", idea.id),
                );
            }
            idea.extension = Kind::ENCRYPTED_EXTENSION.to_string();
            idea.kind = Kind::EncryptedText;
            Ok(())
        })
    }

    pub fn add_tag(&self, id: IdeaId, tag: Tag) -> Result<Idea> {
        self.update(id, |idea| {
            idea.add_tags([tag]);
            Ok(())
        })
    }

    /// Remove a tag from one idea. Removing its last tag is refused.
    pub fn remove_tag(&self, id: IdeaId, tag: &Tag) -> Result<Idea> {
        self.update(id, |idea| idea.remove_tags(std::slice::from_ref(tag)))
    }

    /// Rename a tag on every idea that carries it. Returns the number of
    /// ideas changed.
    #[tracing::instrument(skip(self), fields(from = %from, to = %to))]
    pub fn rename_tag(&self, from: &Tag, to: &Tag) -> Result<usize> {
        let mut changed = 0;
        for mut idea in self.list_all()? {
            if !idea.has_tag(from) {
                continue;
            }
            self.update_idea(&mut idea, |idea| {
                idea.rename_tag(from, to);
                Ok(())
            })?;
            changed += 1;
        }
        Ok(changed)
    }

    /// Remove a tag from every idea that carries it. Fails on the first
    /// idea for which it is the only tag; earlier ideas stay changed.
    #[tracing::instrument(skip(self), fields(tag = %tag))]
    pub fn destroy_tag(&self, tag: &Tag) -> Result<usize> {
        let mut changed = 0;
        for mut idea in self.list_all()? {
            if !idea.has_tag(tag) {
                continue;
            }
            self.update_idea(&mut idea, |idea| {
                idea.remove_tags(std::slice::from_ref(tag))
            })?;
            changed += 1;
        }
        Ok(changed)
    }

    /// Add `tag` to every idea matching any predicate of `query`
    pub fn add_tag_to_matching(&self, tag: &Tag, query: &Query) -> Result<usize> {
        let mut changed = 0;
        for mut idea in self.find_any(query)? {
            if idea.has_tag(tag) {
                continue;
            }
            self.update_idea(&mut idea, |idea| {
                idea.add_tags([tag.clone()]);
                Ok(())
            })?;
            changed += 1;
        }
        Ok(changed)
    }

    /// Remove an idea's file: moved to `trash/` or deleted, per config
    pub fn remove_idea(&self, idea: &Idea) -> Result<()> {
        let path = self.path_of(idea);
        if self.config.trash_on_remove {
            let trash = self.trash_dir();
            fs::create_dir_all(&trash).map_err(map_io_err!("create directory", trash))?;
            let target = trash.join(idea.filename());
            fs::rename(&path, &target).map_err(map_io_err!("trash idea", path))?;
            tracing::debug!(filename = %idea.filename(), "moved idea to trash");
        } else {
            fs::remove_file(&path).map_err(map_io_err!("delete idea", path))?;
            tracing::debug!(filename = %idea.filename(), "deleted idea");
        }
        Ok(())
    }

    /// Remove the idea with this id
    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn remove(&self, id: IdeaId) -> Result<Idea> {
        let idea = self.resolve(id)?;
        self.remove_idea(&idea)?;
        Ok(idea)
    }

    /// Remove every idea with an id in `start..=end`
    pub fn remove_range(&self, start: IdeaId, end: IdeaId) -> Result<usize> {
        let doomed = self.list_all()?.in_range(start, end);
        for idea in &doomed {
            self.remove_idea(idea)?;
        }
        Ok(doomed.len())
    }
}
