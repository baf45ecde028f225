//! # Stats Repository
//!
//! Whole-table counts shown when a session starts.

use sqlx::sqlite::SqliteConnection;

use crate::error::{DbError, DbResult};
use crate::primitives::{fetch_one, log_mapping_failure};

/// Repository for dataset statistics.
#[derive(Debug)]
pub struct StatsRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> StatsRepository<'c> {
    /// Creates a new StatsRepository over the session connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        StatsRepository { conn }
    }

    /// Number of movies.
    pub async fn count_movies(&mut self) -> DbResult<i64> {
        self.count("SELECT count(*) FROM Movies").await
    }

    /// Number of ratings across all movies.
    pub async fn count_reviews(&mut self) -> DbResult<i64> {
        self.count("SELECT count(*) FROM Ratings").await
    }

    async fn count(&mut self, sql: &str) -> DbResult<i64> {
        // count(*) always yields exactly one row.
        fetch_one(self.conn, sql, &[])
            .await?
            .ok_or_else(|| DbError::Internal("count returned no row".to_string()))
            .and_then(|row| row.i64_at(0))
            .map_err(|e| log_mapping_failure("count", e))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
