//! # movielens-db: Database Layer for MovieLens
//!
//! This crate provides database access for the MovieLens query tool.
//! It talks to one SQLite file through sqlx, one statement at a time.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MovieLens Data Flow                              │
//! │                                                                         │
//! │  Shell command (details 5)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  movielens-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Primitives  │  │   │
//! │  │   │(connection.rs)│    │  (movie.rs)   │    │(fetch_one,   │  │   │
//! │  │   │               │    │               │    │ fetch_many,  │  │   │
//! │  │   │ one           │◄───│ MovieRepo     │───►│ execute)     │  │   │
//! │  │   │ SqliteConn    │    │ ReviewRepo    │    │              │  │   │
//! │  │   │               │    │ TaglineRepo   │    │ SqlRow /     │  │   │
//! │  │   │               │    │ StatsRepo     │    │ SqlValue     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   MovieLens.db                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`connection`] - Opening and closing the session connection
//! - [`primitives`] - Parameterized fetch/execute
//! - [`value`] - Row and value types the primitives return
//! - [`repository`] - Query/mapping layer (movies, reviews, taglines, stats)
//! - [`schema`] - Development schema bootstrap
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use movielens_db::{Database, DbConfig};
//!
//! let mut db = Database::open(DbConfig::new("MovieLens.db")).await?;
//!
//! let movies = db.movies().search_by_name("%Godfather%").await?;
//! let outcome = db.reviews().add(movies[0].movie_id, 9).await?;
//!
//! db.close().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod connection;
pub mod error;
pub mod primitives;
pub mod repository;
pub mod schema;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use connection::{Database, DbConfig};
pub use error::{DbError, DbResult};
pub use value::{SqlRow, SqlValue};

// Repository re-exports for convenience
pub use repository::{MovieRepository, ReviewRepository, StatsRepository, TaglineRepository};
