//! # Domain Types
//!
//! Records produced by the query layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │     Movie       │   │   MovieRating   │   │    MovieDetails     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  movie_id       │   │  movie_id       │   │  movie_id, title    │   │
//! │  │  title          │   │  title, year    │   │  review aggregates  │   │
//! │  │  release_year   │   │  num_reviews    │   │  date, runtime, ... │   │
//! │  └─────────────────┘   │  avg_rating     │   │  tagline            │   │
//! │    search results      └─────────────────┘   │  genres, companies  │   │
//! │                          top-N results       └─────────────────────┘   │
//! │                                                single-movie lookup     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every record is assembled fresh per call. Nothing here is cached or
//! shared; review aggregates are always recomputed from the ratings table.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Quantity
// =============================================================================

/// A numeric column that is normally whole but may be stored as REAL.
///
/// SQLite does not enforce declared column types, so `Runtime`, `Budget` and
/// `Revenue` can hold `95.5` or `1.5e6`. Whole-valued reals are kept as
/// [`Quantity::Whole`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Whole(i64),
    Fractional(f64),
}

impl Quantity {
    /// Builds a quantity from a real, collapsing integral values to `Whole`.
    pub fn from_real(value: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, which is out of range.
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        if value.fract() == 0.0 && in_range {
            Quantity::Whole(value as i64)
        } else {
            Quantity::Fractional(value)
        }
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Quantity::Whole(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Whole(v) => write!(f, "{}", v),
            Quantity::Fractional(v) => write!(f, "{}", v),
        }
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A movie as returned by a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    /// Year part of the release date; `None` when the date is unknown.
    pub release_year: Option<i32>,
}

// =============================================================================
// Movie Rating
// =============================================================================

/// A movie with its review aggregates, as returned by a top-N query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRating {
    pub movie_id: i64,
    pub title: String,
    pub release_year: Option<i32>,
    /// Number of ratings recorded for the movie.
    pub num_reviews: i64,
    /// Mean of those ratings (0..10).
    pub avg_rating: f64,
}

// =============================================================================
// Movie Details
// =============================================================================

/// The full projection of one movie.
///
/// A movie with no reviews, tagline, genres or companies still yields a
/// complete record: `0`, `0.0`, `""` and empty lists respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub movie_id: i64,
    pub title: String,
    pub num_reviews: i64,
    pub avg_rating: f64,
    /// `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Minutes.
    pub runtime: Option<Quantity>,
    pub original_language: Option<String>,
    /// USD.
    pub budget: Option<Quantity>,
    /// USD.
    pub revenue: Option<Quantity>,
    /// Empty when the movie has no tagline. Never null.
    pub tagline: String,
    /// Alphabetical.
    pub genres: Vec<String>,
    /// Alphabetical.
    pub production_companies: Vec<String>,
}

impl MovieDetails {
    /// Returns true if at least one review exists for the movie.
    #[inline]
    pub fn has_reviews(&self) -> bool {
        self.num_reviews > 0
    }
}

// =============================================================================
// Write Outcome
// =============================================================================

/// Result of a write that reached the database without a backend failure.
///
/// Backend failures are reported separately (as `Err` by the db layer), so
/// "movie does not exist" and "insert failed" can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The row was inserted or updated.
    Applied,
    /// No movie with the given id; nothing was written.
    MovieNotFound,
}

impl WriteOutcome {
    /// Returns true if the write was applied.
    #[inline]
    pub const fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }

    /// Legacy two-signal status: `1` when applied, `0` otherwise.
    ///
    /// Callers that only care about success fold a backend error into `0`
    /// as well.
    #[inline]
    pub const fn status_code(&self) -> i32 {
        match self {
            WriteOutcome::Applied => 1,
            WriteOutcome::MovieNotFound => 0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
