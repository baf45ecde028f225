//! # CLI Error Type
//!
//! Unified error type for the shell.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  ConfigError ──────┐                                                   │
//! │  ValidationError ──┤                                                   │
//! │  CoreError ────────┼──► CliError ──┬── interactive: print, keep going  │
//! │  DbError ──────────┤               │                                   │
//! │  io::Error ────────┘               └── one-shot: print, exit 1         │
//! │                                         (--json: {"code","message"})   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use movielens_core::{CoreError, ValidationError};
use movielens_db::DbError;

use crate::config::ConfigError;

/// Errors surfaced by the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable error codes for `--json` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The requested movie does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Bad configuration
    ConfigError,

    /// Anything else
    Internal,
}

/// Serialized form of a failed one-shot command.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Validation(_) | CliError::Core(CoreError::Validation(_)) => {
                ErrorCode::ValidationError
            }
            CliError::Core(CoreError::MovieNotFound(_)) => ErrorCode::NotFound,
            CliError::Db(_) => ErrorCode::DatabaseError,
            CliError::Io(_) | CliError::Json(_) => ErrorCode::Internal,
        }
    }

    /// Builds the `--json` error body.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Result type for shell operations.
pub type CliResult<T> = Result<T, CliError>;
