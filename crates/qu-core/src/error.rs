//! Error types and exit codes for qu
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO and other environment problems)
//! - 2: Usage error (bad arguments, reserved keywords, bad values)
//! - 3: Data error (malformed filenames, unknown ids, broken invariants)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - malformed store contents, unknown ids (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during qu operations
#[derive(Error, Debug)]
pub enum QuError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("reserved tag name used: {name}")]
    ReservedKeyword { name: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("store not found at {path:?}")]
    StoreNotFound { path: PathBuf },

    #[error("bad filename {filename}: {reason}")]
    MalformedFilename { filename: String, reason: String },

    #[error("nothing found at id {id}")]
    UnknownId { id: String },

    #[error("cannot remove the final tag of {filename}")]
    InvalidTagRemoval { filename: String },

    #[error("idea {id} cannot move from {from} to {to}")]
    InvalidTransition { id: String, from: String, to: String },

    #[error("unequal number of lines in working files ({filenames} filename lines, {content} content lines)")]
    UnequalWorkingLines { filenames: usize, content: usize },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl QuError {
    /// Create an error for a filename that does not follow the grammar
    pub fn malformed(filename: &str, reason: impl std::fmt::Display) -> Self {
        QuError::MalformedFilename {
            filename: filename.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed IO operation with path context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        QuError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        QuError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        QuError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an id lookup miss
    pub fn unknown_id(id: impl std::fmt::Display) -> Self {
        QuError::UnknownId { id: id.to_string() }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            QuError::UsageError(_)
            | QuError::ReservedKeyword { .. }
            | QuError::InvalidValue { .. } => ExitCode::Usage,

            QuError::StoreNotFound { .. }
            | QuError::MalformedFilename { .. }
            | QuError::UnknownId { .. }
            | QuError::InvalidTagRemoval { .. }
            | QuError::InvalidTransition { .. }
            | QuError::UnequalWorkingLines { .. }
            | QuError::NotFound { .. } => ExitCode::Data,

            QuError::Io(_)
            | QuError::Toml(_)
            | QuError::Json(_)
            | QuError::FailedOperationWithTarget { .. }
            | QuError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            QuError::UsageError(_) => "usage_error",
            QuError::ReservedKeyword { .. } => "reserved_keyword",
            QuError::InvalidValue { .. } => "invalid_value",
            QuError::StoreNotFound { .. } => "store_not_found",
            QuError::MalformedFilename { .. } => "malformed_filename",
            QuError::UnknownId { .. } => "unknown_id",
            QuError::InvalidTagRemoval { .. } => "invalid_tag_removal",
            QuError::InvalidTransition { .. } => "invalid_transition",
            QuError::UnequalWorkingLines { .. } => "unequal_working_lines",
            QuError::NotFound { .. } => "not_found",
            QuError::Io(_) => "io_error",
            QuError::Toml(_) => "toml_error",
            QuError::Json(_) => "json_error",
            QuError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            QuError::Other(_) => "other",
        }
    }

    /// Convert error to JSON for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for qu operations
pub type Result<T> = std::result::Result<T, QuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(
            QuError::ReservedKeyword {
                name: "WITHOUT".into()
            }
            .exit_code(),
            ExitCode::Usage
        );
        assert_eq!(QuError::unknown_id("000004").exit_code(), ExitCode::Data);
        assert_eq!(
            QuError::malformed("x", "too few tokens").exit_code(),
            ExitCode::Data
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(QuError::from(io).exit_code(), ExitCode::Failure);
    }

    #[test]
    fn test_to_json_shape() {
        let json = QuError::unknown_id("000012").to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "unknown_id");
        assert_eq!(json["error"]["message"], "nothing found at id 000012");
    }
}
