//! # Validation Module
//!
//! Input rules for MovieLens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (movielens-cli)                                        │
//! │  ├── Parse text input into numbers                                     │
//! │  └── THIS MODULE: range and sign checks                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Query layer (movielens-db)                                   │
//! │  └── Trusts its arguments; does NOT re-validate                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── Whatever constraints the schema declares                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use movielens_core::validation::{parse_movie_id, validate_positive_count};
//!
//! assert_eq!(parse_movie_id(" 42 ").unwrap(), 42);
//! assert_eq!(validate_positive_count("N", 10).unwrap(), 10);
//! assert!(validate_positive_count("N", 0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_RATING, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Parsers
// =============================================================================

/// Parses a whole number typed by the user.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Empty input is `Required`
/// - Anything that is not an integer is `InvalidFormat`
pub fn parse_integer(field: &str, input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    input.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a whole number", input),
    })
}

/// Parses a movie id.
///
/// Any integer is accepted; whether the movie exists is the query layer's
/// business.
pub fn parse_movie_id(input: &str) -> ValidationResult<i64> {
    parse_integer("movie id", input)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a review rating.
///
/// ## Rules
/// - Must be between MIN_RATING (0) and MAX_RATING (10), inclusive
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Command 4: Add Review                                                  │
/// │                                                                         │
/// │  User enters rating: 11                                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_rating(11) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── outside 0..10? → "Invalid rating..."                         │
/// │       │                                                                 │
/// │       └── OK → prompt for movie id, then ReviewRepository::add         │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_rating(rating: i64) -> ValidationResult<i64> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }

    Ok(rating)
}

/// Validates a count that must be at least one (top-N size, minimum number
/// of reviews).
///
/// ## Returns
/// The count as `u32`; values above `u32::MAX` are out of range.
pub fn validate_positive_count(field: &str, value: i64) -> ValidationResult<u32> {
    if value < 1 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field: field.to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
