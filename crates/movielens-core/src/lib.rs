//! # movielens-core: Domain Records for MovieLens
//!
//! This crate holds the read-only records the query layer produces and the
//! input rules the shell enforces before calling it. It has zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MovieLens Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    movielens-cli (shell)                        │   │
//! │  │    prompt ──► validate ──► call repository ──► render           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ movielens-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐                │   │
//! │  │   │   types   │  │  validation │  │   error   │                │   │
//! │  │   │   Movie   │  │   rating    │  │ CoreError │                │   │
//! │  │   │  Details  │  │   counts    │  │           │                │   │
//! │  │   └───────────┘  └─────────────┘  └───────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                movielens-db (Database Layer)                    │   │
//! │  │          primitives, repositories, record mapping               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Movie, MovieRating, MovieDetails, WriteOutcome)
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules checked by the shell
//!
//! ## Example Usage
//!
//! ```rust
//! use movielens_core::validation::validate_rating;
//!
//! assert_eq!(validate_rating(7).unwrap(), 7);
//! assert!(validate_rating(11).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest rating a review may carry.
pub const MIN_RATING: i64 = 0;

/// Highest rating a review may carry.
pub const MAX_RATING: i64 = 10;

/// Top-N requests at or above this size always yield an empty list.
///
/// ## Business Reason
/// Guards the shell against unbounded result sets. This is a rule, not a
/// limit to clamp to: `top_rated(1000, ..)` returns nothing.
pub const TOP_N_CAP: u32 = 1000;

/// Default number of search hits the shell will list before asking the
/// user to narrow the pattern.
pub const DEFAULT_SEARCH_DISPLAY_LIMIT: usize = 100;
