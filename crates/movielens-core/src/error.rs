//! # Error Types
//!
//! Domain-specific error types for movielens-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  movielens-core errors (this file)                                     │
//! │  ├── CoreError        - Domain outcomes the shell reports              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  movielens-db errors (separate crate)                                  │
//! │  └── DbError          - Engine/driver failures                         │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │        DbError ─────────────────────┴──► CliError → terminal           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors.
///
/// Not-found is a normal query outcome (`None` / `WriteOutcome::MovieNotFound`);
/// this type exists for callers that want to turn it into an error.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No movie with this id.
    #[error("Movie not found: {0}")]
    MovieNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The shell checks them before any query runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MovieNotFound(9999);
        assert_eq!(err.to_string(), "Movie not found: 9999");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 10,
        };
        assert_eq!(err.to_string(), "rating must be between 0 and 10");

        let err = ValidationError::MustBePositive {
            field: "N".to_string(),
        };
        assert_eq!(err.to_string(), "N must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "movie id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
