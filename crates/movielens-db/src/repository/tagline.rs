//! # Tagline Repository
//!
//! A movie has zero or one tagline row. Setting a tagline selects first and
//! then either inserts or updates; rows are never deleted.
//!
//! ```text
//! set(id, text)
//!   │
//!   ├── movie missing?        → MovieNotFound (nothing written)
//!   ├── no Movie_Taglines row → INSERT (id, text)
//!   └── row exists            → UPDATE ... SET Tagline = text
//! ```

use sqlx::sqlite::SqliteConnection;
use tracing::{debug, info};

use movielens_core::WriteOutcome;

use crate::error::DbResult;
use crate::primitives::{execute, fetch_one, log_mapping_failure};
use crate::repository::movie_exists;

/// Reads the tagline row for a movie.
///
/// `None` means there is no row. A row holding NULL reads as `""`.
pub(crate) async fn lookup_tagline(
    conn: &mut SqliteConnection,
    movie_id: i64,
) -> DbResult<Option<String>> {
    let row = fetch_one(
        conn,
        "SELECT Tagline FROM Movie_Taglines WHERE Movie_ID = ?",
        &[movie_id.into()],
    )
    .await?;

    row.map(|row| row.opt_text_at(0).map(Option::unwrap_or_default))
        .transpose()
        .map_err(|e| log_mapping_failure("lookup_tagline", e))
}

/// Repository for movie taglines.
#[derive(Debug)]
pub struct TaglineRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> TaglineRepository<'c> {
    /// Creates a new TaglineRepository over the session connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        TaglineRepository { conn }
    }

    /// Returns the movie's tagline, or `None` if it has no tagline row.
    pub async fn get(&mut self, movie_id: i64) -> DbResult<Option<String>> {
        lookup_tagline(self.conn, movie_id).await
    }

    /// Sets the movie's tagline, inserting or replacing it.
    ///
    /// The empty string is stored like any other tagline.
    ///
    /// ## Returns
    /// * `Ok(WriteOutcome::Applied)` - Tagline stored
    /// * `Ok(WriteOutcome::MovieNotFound)` - No such movie; nothing written
    /// * `Err(DbError)` - Backend failure; nothing committed
    pub async fn set(&mut self, movie_id: i64, tagline: &str) -> DbResult<WriteOutcome> {
        if !movie_exists(self.conn, movie_id).await? {
            debug!(movie_id, "Tagline not set: no such movie");
            return Ok(WriteOutcome::MovieNotFound);
        }

        if lookup_tagline(self.conn, movie_id).await?.is_none() {
            execute(
                self.conn,
                "INSERT INTO Movie_Taglines (Movie_ID, Tagline) VALUES (?, ?)",
                &[movie_id.into(), tagline.into()],
            )
            .await?;
            info!(movie_id, "Tagline inserted");
        } else {
            execute(
                self.conn,
                "UPDATE Movie_Taglines SET Tagline = ? WHERE Movie_ID = ?",
                &[tagline.into(), movie_id.into()],
            )
            .await?;
            info!(movie_id, "Tagline updated");
        }

        Ok(WriteOutcome::Applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
