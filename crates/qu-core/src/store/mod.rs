//! Store management for qu
//!
//! The store is a root directory holding the `ideas/` directory plus a few
//! small bookkeeping files. Every idea is one file whose name is its whole
//! metadata record; there is no index.
//!
//! A store assumes a single writer. Nothing here locks the directory, and a
//! mutation is only as atomic as the rename that carries it.

mod list;
mod mutate;
pub mod paths;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use crate::allocator::Allocator;
use crate::config::StoreConfig;
use crate::error::{QuError, Result};
use crate::idea::{Idea, IdeaId};
use crate::map_io_err;
use crate::query::{ContentSource, KeywordRegistry};
use crate::recency::RecencyCache;

pub use list::Ideas;
pub use summary::Stats;

use paths::{CONFIG_FILE, COUNTER_FILE, IDEAS_DIR, LAST_FILE, TRASH_DIR};

/// The qu store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store
    root: PathBuf,
    /// Store configuration
    config: StoreConfig,
    allocator: Allocator,
    recency: RecencyCache,
    /// Query keywords, built once per store
    registry: KeywordRegistry,
}

impl Store {
    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.join(IDEAS_DIR).is_dir() {
            return Err(QuError::StoreNotFound {
                path: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            StoreConfig::default()
        };

        Ok(Self::assemble(path, config))
    }

    /// Create a store at `path`. Existing directories and files are left
    /// as they are.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn init(path: &Path) -> Result<Self> {
        for dir in [path.to_path_buf(), path.join(IDEAS_DIR), path.join(TRASH_DIR)] {
            fs::create_dir_all(&dir).map_err(map_io_err!("create directory", dir))?;
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            let config = StoreConfig::default();
            config.save(&config_path)?;
            config
        };

        let store = Self::assemble(path, config);
        store.allocator.ensure()?;
        tracing::debug!("store ready");
        Ok(store)
    }

    fn assemble(path: &Path, config: StoreConfig) -> Self {
        Store {
            root: path.to_path_buf(),
            config,
            allocator: Allocator::new(path.join(COUNTER_FILE)),
            recency: RecencyCache::new(path.join(LAST_FILE)),
            registry: KeywordRegistry::standard(),
        }
    }

    /// Get the store root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the ideas directory
    pub fn ideas_dir(&self) -> PathBuf {
        self.root.join(IDEAS_DIR)
    }

    /// Get the trash directory
    pub fn trash_dir(&self) -> PathBuf {
        self.root.join(TRASH_DIR)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    pub fn recency(&self) -> &RecencyCache {
        &self.recency
    }

    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    /// On-disk path of an idea
    pub fn path_of(&self, idea: &Idea) -> PathBuf {
        self.ideas_dir().join(idea.filename())
    }

    /// Raw content of an idea's file
    pub fn read_bytes(&self, idea: &Idea) -> Result<Vec<u8>> {
        let path = self.path_of(idea);
        fs::read(&path).map_err(map_io_err!("read idea", path))
    }

    /// Content of an idea's file as text
    pub fn read_text(&self, idea: &Idea) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.read_bytes(idea)?).into_owned())
    }

    /// Content of the idea with this id
    pub fn content_of(&self, id: IdeaId) -> Result<String> {
        let idea = self.resolve(id)?;
        self.read_text(&idea)
    }
}

impl ContentSource for Store {
    fn read_content(&self, idea: &Idea) -> Result<Vec<u8>> {
        self.read_bytes(idea)
    }
}
