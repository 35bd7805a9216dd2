//! Monotonic id allocator
//!
//! The counter file holds the last committed id. Minting is a two-step
//! contract: [`Allocator::next_id`] peeks at counter+1 without writing,
//! and [`Allocator::increment`] commits it. A mint without a commit hands
//! out the same id again.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{QuError, Result};
use crate::idea::IdeaId;
use crate::map_io_err;

#[derive(Debug, Clone)]
pub struct Allocator {
    path: PathBuf,
}

impl Allocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Allocator { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the counter file at zero if it is missing
    pub fn ensure(&self) -> Result<()> {
        if !self.path.exists() {
            self.write(IdeaId::new(0))?;
        }
        Ok(())
    }

    /// The id the next created idea should use. Does not write.
    pub fn next_id(&self) -> Result<IdeaId> {
        self.current()?
            .next()
            .ok_or_else(|| QuError::Other("id space exhausted".to_string()))
    }

    /// Commit the id returned by [`Allocator::next_id`]
    pub fn increment(&self) -> Result<IdeaId> {
        let next = self.next_id()?;
        self.write(next)?;
        tracing::debug!(id = %next, "committed id");
        Ok(next)
    }

    /// Last committed id
    pub fn current(&self) -> Result<IdeaId> {
        let raw = fs::read_to_string(&self.path).map_err(map_io_err!("read counter", self.path))?;
        raw.trim()
            .parse::<IdeaId>()
            .map_err(|_| QuError::invalid_value("id counter", raw.trim()))
    }

    fn write(&self, id: IdeaId) -> Result<()> {
        fs::write(&self.path, format!("{id}\n")).map_err(map_io_err!("write counter", self.path))
    }
}
