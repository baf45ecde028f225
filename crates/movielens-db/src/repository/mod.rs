//! # Repository Module
//!
//! The query/mapping layer: each repository turns one family of MovieLens
//! questions into SQL, runs it through the primitives and maps the rows
//! into `movielens_core` records.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Query/Mapping Layer                                  │
//! │                                                                         │
//! │  Shell command                                                         │
//! │       │                                                                 │
//! │       │  db.movies().get_details(5)                                    │
//! │       ▼                                                                 │
//! │  MovieRepository<'c>  (borrows &'c mut SqliteConnection)               │
//! │  ├── search_by_name(pattern)                                           │
//! │  ├── get_details(movie_id)                                             │
//! │  └── top_rated(n, min_reviews)                                         │
//! │       │                                                                 │
//! │       │  fetch_one / fetch_many / execute                              │
//! │       ▼                                                                 │
//! │  SqlRow tuples ──► Movie / MovieRating / MovieDetails                  │
//! │                                                                         │
//! │  Not found   → Ok(None) / Ok(WriteOutcome::MovieNotFound)              │
//! │  Empty       → Ok(vec![]) / "" / 0                                     │
//! │  Backend     → Err(DbError), already logged by the primitive           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MovieRepository`] - Search, details, top-rated
//! - [`ReviewRepository`] - Adding ratings
//! - [`TaglineRepository`] - Reading and setting taglines
//! - [`StatsRepository`] - Table counts

pub mod movie;
pub mod review;
pub mod stats;
pub mod tagline;

pub use movie::MovieRepository;
pub use review::ReviewRepository;
pub use stats::StatsRepository;
pub use tagline::TaglineRepository;

use sqlx::sqlite::SqliteConnection;

use crate::error::DbResult;
use crate::primitives::fetch_one;

/// Returns true if a movie with this id exists.
///
/// Writes check this first and report `MovieNotFound` instead of touching
/// any table. The check and the write are separate statements.
pub(crate) async fn movie_exists(conn: &mut SqliteConnection, movie_id: i64) -> DbResult<bool> {
    let row = fetch_one(
        conn,
        "SELECT Movie_ID FROM Movies WHERE Movie_ID = ?",
        &[movie_id.into()],
    )
    .await?;
    Ok(row.is_some())
}
