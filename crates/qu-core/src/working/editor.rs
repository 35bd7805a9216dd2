//! Boundary to the external text editor

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{QuError, Result};

/// Something that lets a user edit files and returns once they are done
pub trait Editor {
    /// Edit one file
    fn edit(&self, path: &Path) -> Result<()>;

    /// Edit two line-aligned files side by side, scroll-locked, with the
    /// left pane `left_width` columns wide
    fn edit_split(&self, left: &Path, right: &Path, left_width: usize) -> Result<()>;
}

/// Runs the configured editor command and waits for it to exit
#[derive(Debug, Clone)]
pub struct ProcessEditor {
    program: String,
    args: Vec<String>,
}

impl ProcessEditor {
    /// Parse a command line such as `vim` or `code --wait`
    pub fn new(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace().map(String::from);
        let program = words
            .next()
            .ok_or_else(|| QuError::UsageError("no editor configured".to_string()))?;
        Ok(ProcessEditor {
            program,
            args: words.collect(),
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Self::new(&config.editor_command())
    }

    fn is_vim(&self) -> bool {
        let name = Path::new(&self.program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        matches!(name, "vim" | "nvim" | "vi")
    }

    fn run(&self, extra: &[&OsStr]) -> Result<()> {
        debug!(editor = %self.program, "open_editor");
        let status = Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .status()
            .map_err(|e| QuError::Other(format!("failed to open editor '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(QuError::Other(format!(
                "editor '{}' exited with non-zero status: {:?}",
                self.program, status
            )));
        }
        Ok(())
    }
}

impl Editor for ProcessEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        self.run(&[path.as_os_str()])
    }

    fn edit_split(&self, left: &Path, right: &Path, left_width: usize) -> Result<()> {
        if !self.is_vim() {
            return self.run(&[left.as_os_str(), right.as_os_str()]);
        }
        let layout = format!(
            "vertical resize {} | set scb! | execute \"normal \\<C-w>\\<C-l>\" | set scb!",
            left_width + 4
        );
        self.run(&[
            OsStr::new("-c"),
            OsStr::new(&layout),
            OsStr::new("-O"),
            left.as_os_str(),
            right.as_os_str(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_with_arguments() {
        let editor = ProcessEditor::new("code --wait").unwrap();
        assert_eq!(editor.program, "code");
        assert_eq!(editor.args, vec!["--wait"]);
        assert!(!editor.is_vim());
    }

    #[test]
    fn test_vim_detection_by_file_name() {
        assert!(ProcessEditor::new("/usr/bin/nvim").unwrap().is_vim());
    }

    #[test]
    fn test_blank_command_is_usage_error() {
        assert!(matches!(
            ProcessEditor::new("  "),
            Err(QuError::UsageError(_))
        ));
    }

    #[test]
    fn test_failing_editor_is_reported() {
        let editor = ProcessEditor::new("false").unwrap();
        assert!(editor.edit(Path::new("/nonexistent")).is_err());
    }
}
