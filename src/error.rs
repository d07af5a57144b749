//! Error types for tasker
//!
//! Every failure exits with code 1. The JSON error envelope carries a
//! `kind` so scripts can tell failures apart:
//! - `io`: store file could not be opened, read, created or written
//! - `lock`: store lock could not be acquired in time
//! - `format`: store content is not valid task data
//! - `validation`: bad command arguments (empty name, bad id)
//! - `not_found`: no task with the requested id
//! - `config`: invalid `.tasker.toml`

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tasker CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Main error type for tasker operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task with ID {0} not found")]
    TaskNotFound(i64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid task data: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }

    /// Short machine-readable classification of the error
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "validation",
            Error::TaskNotFound(_) => "not_found",
            Error::InvalidConfig(_) | Error::TomlParse(_) | Error::TomlSerialize(_) => "config",
            Error::Io(_) => "io",
            Error::Format(_) => "format",
            Error::LockFailed(_) => "lock",
        }
    }

    /// Structured details for the JSON error envelope, when the variant has any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskNotFound(id) => Some(serde_json::json!({ "id": id })),
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            Error::LockFailed(path) => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            Error::Format(err) => Some(serde_json::json!({
                "line": err.line(),
                "column": err.column(),
            })),
            _ => None,
        }
    }

    /// True when the underlying cause is a missing file
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Error::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type alias for tasker operations
pub type Result<T> = std::result::Result<T, Error>;

