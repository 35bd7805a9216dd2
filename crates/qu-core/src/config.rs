//! Store configuration for qu
//!
//! Configuration lives in `<store>/config.toml`. Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QuError, Result};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Environment variable naming the store root
pub const STORE_ENV: &str = "QU_DIR";

/// Store directory name under the home directory
pub const DEFAULT_STORE_DIR: &str = ".qu";

const FALLBACK_EDITOR: &str = "vim";

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Editor override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Maximum width of the filename pane in split edits
    #[serde(default = "default_split_width_max")]
    pub split_width_max: usize,

    /// Move removed ideas to `trash/` instead of deleting them
    #[serde(default = "default_trash_on_remove")]
    pub trash_on_remove: bool,

    /// Editor swap/backup extensions ignored by listings
    #[serde(default = "default_artifact_extensions")]
    pub artifact_extensions: Vec<String>,
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_split_width_max() -> usize {
    65
}

fn default_trash_on_remove() -> bool {
    true
}

fn default_artifact_extensions() -> Vec<String> {
    [".swp", ".swo", ".vim"].map(String::from).to_vec()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            editor: None,
            split_width_max: default_split_width_max(),
            trash_on_remove: default_trash_on_remove(),
            artifact_extensions: default_artifact_extensions(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;
        if config.version > STORE_FORMAT_VERSION {
            tracing::warn!(
                version = config.version,
                supported = STORE_FORMAT_VERSION,
                "store was written by a newer qu"
            );
        }
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| QuError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Editor command: config, then `$EDITOR`, then vim
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
    }

    /// Whether a filename is an editor artifact rather than an idea
    pub fn is_artifact(&self, filename: &str) -> bool {
        self.artifact_extensions
            .iter()
            .any(|ext| filename.ends_with(ext.as_str()))
    }
}

/// Resolve the store root: explicit path, then `QU_DIR`, then `~/.qu`
pub fn resolve_store_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(STORE_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_STORE_DIR))
        .ok_or_else(|| QuError::Other("cannot determine home directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.version, STORE_FORMAT_VERSION);
        assert_eq!(config.split_width_max, 65);
        assert!(config.trash_on_remove);
        assert!(config.editor.is_none());
        assert!(config.is_artifact("a,000001,2024-01-01,e2024-01-01,x.swp"));
        assert!(!config.is_artifact("a,000001,2024-01-01,e2024-01-01,x.png"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = StoreConfig {
            editor: Some("nano".to_string()),
            trash_on_remove: false,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.editor_command(), "nano");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "split_width_max = 40\n").unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded.split_width_max, 40);
        assert!(loaded.trash_on_remove);
        assert_eq!(loaded.artifact_extensions.len(), 3);
    }

    #[test]
    fn test_bad_config_is_toml_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "split_width_max = \"wide\"\n").unwrap();

        assert!(matches!(
            StoreConfig::load(&path),
            Err(QuError::Toml(_))
        ));
    }

    #[test]
    fn test_explicit_store_root_wins() {
        let dir = tempdir().unwrap();
        assert_eq!(resolve_store_root(Some(dir.path())).unwrap(), dir.path());
    }
}
