//! Batch working set
//!
//! Many text ideas are edited in one session through two line-aligned
//! scratch files: `working_files` holds each idea's filename followed by
//! blank padding lines, `working_content` holds the content. Saving maps
//! every block back onto its idea.
//!
//! A block headed by `SPLIT` (optionally followed by extra tags) becomes a
//! new idea carved from the closest real filename above it. A block whose
//! lines are all blank removes its idea.
//!
//! Reconciling is not atomic: an error part way through leaves earlier
//! blocks applied.

mod editor;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::codec;
use crate::error::{QuError, Result};
use crate::idea::{parse_tag_list, today, Idea, IdeaId};
use crate::{bail_usage, map_io_err};
use crate::store::paths::{WORKING_CONTENT, WORKING_FILES};
use crate::store::{Ideas, Store};

pub use editor::{Editor, ProcessEditor};

/// Header marking a block that should become a new idea
pub const SPLIT_MARKER: &str = "SPLIT";

/// Extra columns beside the longest filename in the filename pane
const PANE_PADDING: usize = 2;

/// What [`WorkingSet::build`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// Nothing matched
    Empty,
    /// Exactly one idea matched; edit its file directly
    Single(PathBuf),
    /// Scratch files were written; the filename pane should be this wide
    Batch { width: usize },
}

/// What a reconcile changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Ideas whose file was renamed or rewritten
    pub rewritten: Vec<IdeaId>,
    /// New ideas created from SPLIT blocks
    pub split: Vec<IdeaId>,
    /// Ideas removed by blanking their block
    pub removed: Vec<IdeaId>,
    /// Ideas whose content changed
    pub edited: Vec<IdeaId>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.rewritten.is_empty()
            && self.split.is_empty()
            && self.removed.is_empty()
            && self.edited.is_empty()
    }
}

/// Content as it appears in the content pane: always ending in a newline,
/// so an idea occupies whole lines
fn normalize(content: &str) -> String {
    if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{content}\n")
    }
}

/// Extra tags of a `SPLIT` header, or None if `header` is not one
fn split_tags(header: &str) -> Option<&str> {
    let rest = header.strip_prefix(SPLIT_MARKER)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

fn join_block(lines: &[&str]) -> String {
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

/// The two scratch files and the state needed to save them back
#[derive(Debug)]
pub struct WorkingSet<'a> {
    store: &'a Store,
    files_path: PathBuf,
    content_path: PathBuf,
    snapshot: Option<(Vec<u8>, Vec<u8>)>,
}

impl<'a> WorkingSet<'a> {
    pub fn new(store: &'a Store) -> Self {
        WorkingSet {
            store,
            files_path: store.root().join(WORKING_FILES),
            content_path: store.root().join(WORKING_CONTENT),
            snapshot: None,
        }
    }

    pub fn files_path(&self) -> &Path {
        &self.files_path
    }

    pub fn content_path(&self) -> &Path {
        &self.content_path
    }

    /// Write the scratch files for `ideas`. A lone idea is returned as a
    /// path unless `force_split` is set. Non-text ideas are left out.
    #[tracing::instrument(skip(self, ideas), fields(count = ideas.len()))]
    pub fn build(&mut self, ideas: &Ideas, force_split: bool) -> Result<Prepared> {
        match ideas.as_slice() {
            [] => return Ok(Prepared::Empty),
            [single] if !force_split => {
                return Ok(Prepared::Single(self.store.path_of(single)));
            }
            _ => {}
        }

        let mut files = String::new();
        let mut content = String::new();
        let mut longest = 0;
        for idea in ideas.iter().filter(|idea| idea.is_text()) {
            let body = normalize(&self.store.read_text(idea)?);
            let filename = idea.filename();
            longest = longest.max(filename.len());

            files.push_str(&filename);
            files.push('\n');
            for _ in 1..body.matches('\n').count() {
                files.push('\n');
            }
            content.push_str(&body);
        }

        fs::write(&self.files_path, &files).map_err(map_io_err!("write", self.files_path))?;
        fs::write(&self.content_path, &content)
            .map_err(map_io_err!("write", self.content_path))?;
        self.snapshot = Some((files.into_bytes(), content.into_bytes()));

        let width = (longest + PANE_PADDING).min(self.store.config().split_width_max);
        Ok(Prepared::Batch { width })
    }

    /// Save the scratch files back. Does nothing if neither file changed
    /// since [`WorkingSet::build`].
    pub fn reconcile(&self) -> Result<ReconcileReport> {
        let (files, content) = self.read_buffers()?;
        if let Some((orig_files, orig_content)) = &self.snapshot {
            if *orig_files == files.as_bytes() && *orig_content == content.as_bytes() {
                tracing::debug!("working set unchanged");
                return Ok(ReconcileReport::default());
            }
        }
        self.apply(&files, &content)
    }

    /// Save the scratch files back unconditionally, for recovering a
    /// session whose save was interrupted
    pub fn reconcile_forced(&self) -> Result<ReconcileReport> {
        let (files, content) = self.read_buffers()?;
        self.apply(&files, &content)
    }

    fn read_buffers(&self) -> Result<(String, String)> {
        let files = fs::read_to_string(&self.files_path)
            .map_err(map_io_err!("read", self.files_path))?;
        let content = fs::read_to_string(&self.content_path)
            .map_err(map_io_err!("read", self.content_path))?;
        Ok((files, content))
    }

    #[tracing::instrument(skip_all)]
    fn apply(&self, files: &str, content: &str) -> Result<ReconcileReport> {
        let file_lines: Vec<&str> = files.lines().collect();
        let content_lines: Vec<&str> = content.lines().collect();
        if file_lines.len() != content_lines.len() {
            return Err(QuError::UnequalWorkingLines {
                filenames: file_lines.len(),
                content: content_lines.len(),
            });
        }

        let mut report = ReconcileReport::default();
        let mut recent: Option<Idea> = None;
        for (start, header) in file_lines.iter().enumerate() {
            let header = header.trim();
            if header.is_empty() {
                continue;
            }
            let mut end = start + 1;
            while end < file_lines.len() && file_lines[end].trim().is_empty() {
                end += 1;
            }
            let block = &content_lines[start..end];

            if let Some(extra) = split_tags(header) {
                let Some(base) = recent.as_ref() else {
                    bail_usage!("cannot split with no prior filename");
                };
                if let Some(id) = self.split_block(base, extra, block)? {
                    report.split.push(id);
                }
            } else {
                let idea = codec::decode(header)?;
                recent = Some(idea.clone());
                self.apply_block(idea, block, &mut report)?;
            }
        }
        tracing::debug!(?report, "reconciled working set");
        Ok(report)
    }

    fn apply_block(&self, mut idea: Idea, block: &[&str], report: &mut ReconcileReport) -> Result<()> {
        let old_filename = self.store.resolve_filename(idea.id)?;
        let old = codec::decode(&old_filename)?;
        let previous = normalize(&self.store.read_text(&old)?);
        let body = join_block(block);

        let changed = body != previous;
        if !changed && idea.filename() == old_filename {
            return Ok(());
        }
        if changed && block.iter().all(|line| line.trim().is_empty()) {
            self.store.remove_idea(&old)?;
            report.removed.push(idea.id);
            return Ok(());
        }

        if changed {
            idea.edited = today();
            report.edited.push(idea.id);
        }
        self.store.rename(&old_filename, &idea)?;
        if changed {
            self.store.write_content(&idea, body.as_bytes())?;
        }
        report.rewritten.push(idea.id);
        Ok(())
    }

    fn split_block(&self, base: &Idea, extra: &str, block: &[&str]) -> Result<Option<IdeaId>> {
        if block.iter().all(|line| line.trim().is_empty()) {
            return Ok(None);
        }
        let extra = parse_tag_list(extra.trim())?;
        let date = today();
        let idea = self.store.mint(
            |id| {
                let mut idea = Idea {
                    id,
                    created: date,
                    edited: date,
                    ..base.clone()
                };
                idea.add_tags(extra);
                Ok(idea)
            },
            join_block(block).as_bytes(),
        )?;
        tracing::info!(filename = %idea.filename(), "split out new idea");
        Ok(Some(idea.id))
    }
}

/// Outcome of [`open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    Nothing,
    /// A single file was edited; whether its content changed
    Single { path: PathBuf, edited: bool },
    Batch(ReconcileReport),
}

/// Edit one file, stamping its edit date if the content changed
pub fn edit_single(store: &Store, editor: &dyn Editor, mut idea: Idea) -> Result<bool> {
    let path = store.path_of(&idea);
    let before = fs::read(&path).map_err(map_io_err!("read idea", path))?;
    editor.edit(&path)?;
    let after = fs::read(&path).map_err(map_io_err!("read idea", path))?;
    if before == after {
        return Ok(false);
    }
    store.touch_edited(&mut idea)?;
    Ok(true)
}

/// Open `ideas` for editing: a lone idea directly, several through the
/// working set, then save the result
pub fn open(store: &Store, editor: &dyn Editor, ideas: &Ideas, force_split: bool) -> Result<Opened> {
    let mut working = WorkingSet::new(store);
    match working.build(ideas, force_split)? {
        Prepared::Empty => Ok(Opened::Nothing),
        Prepared::Single(path) => {
            let idea = ideas
                .iter()
                .next()
                .cloned()
                .ok_or_else(|| QuError::Other("single idea vanished".to_string()))?;
            let edited = edit_single(store, editor, idea)?;
            Ok(Opened::Single { path, edited })
        }
        Prepared::Batch { width } => {
            editor.edit_split(working.files_path(), working.content_path(), width)?;
            Ok(Opened::Batch(working.reconcile()?))
        }
    }
}
