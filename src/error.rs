//! Error types for taskmap
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task or team, invalid config or color)
//! - 4: Operation failed (feed load, storage I/O, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskmap CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskmap operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid color '{0}': expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    // Operation failures (exit code 4)
    #[error("Failed to load feed {path}: {reason}")]
    FeedLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::InvalidColor(_)
            | Error::TaskNotFound(_)
            | Error::TeamNotFound(_) => exit_codes::USER_ERROR,

            Error::FeedLoad { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for JSON error output, when the variant carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::FeedLoad { path, reason } => Some(serde_json::json!({
                "path": path.display().to_string(),
                "reason": reason,
            })),
            Error::TaskNotFound(id) => Some(serde_json::json!({ "task": id })),
            Error::TeamNotFound(id) => Some(serde_json::json!({ "team": id })),
            Error::InvalidConfig(message) => Some(serde_json::json!({ "message": message })),
            _ => None,
        }
    }
}

/// Result type alias for taskmap operations
pub type Result<T> = std::result::Result<T, Error>;
