//! # Review Repository
//!
//! Appends ratings. Ratings are never updated or removed, so a movie's
//! aggregate only ever grows by one review per call.

use sqlx::sqlite::SqliteConnection;
use tracing::{debug, info};

use movielens_core::WriteOutcome;

use crate::error::DbResult;
use crate::primitives::execute;
use crate::repository::movie_exists;

/// Repository for movie reviews.
#[derive(Debug)]
pub struct ReviewRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ReviewRepository<'c> {
    /// Creates a new ReviewRepository over the session connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ReviewRepository { conn }
    }

    /// Records one rating for a movie.
    ///
    /// The caller validates the rating range (0..=10) beforehand.
    ///
    /// ## Returns
    /// * `Ok(WriteOutcome::Applied)` - Rating inserted and committed
    /// * `Ok(WriteOutcome::MovieNotFound)` - No such movie; `Ratings` untouched
    /// * `Err(DbError)` - Backend failure; nothing committed
    pub async fn add(&mut self, movie_id: i64, rating: i64) -> DbResult<WriteOutcome> {
        if !movie_exists(self.conn, movie_id).await? {
            debug!(movie_id, "Review not added: no such movie");
            return Ok(WriteOutcome::MovieNotFound);
        }

        execute(
            self.conn,
            "INSERT INTO Ratings (Movie_ID, Rating) VALUES (?, ?)",
            &[movie_id.into(), rating.into()],
        )
        .await?;

        info!(movie_id, rating, "Review added");
        Ok(WriteOutcome::Applied)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::test_support::fixture_db;

    #[tokio::test]
    async fn test_add_to_missing_movie_leaves_ratings_alone() {
        let mut db = fixture_db().await;
        let before = db.stats().count_reviews().await.unwrap();

        let outcome = db.reviews().add(999, 7).await.unwrap();

        assert_eq!(outcome, WriteOutcome::MovieNotFound);
        assert_eq!(db.stats().count_reviews().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_add_updates_aggregates() {
        let mut db = fixture_db().await;

        let outcome = db.reviews().add(5, 5).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Applied);
        assert_eq!(outcome.status_code(), 1);

        let details = db.movies().get_details(5).await.unwrap().unwrap();
        assert_eq!(details.num_reviews, 4);
        // (8 + 9 + 10 + 5) / 4
        assert!((details.avg_rating - 8.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_first_review_of_unrated_movie() {
        let mut db = fixture_db().await;
        db.reviews().add(4, 0).await.unwrap();

        let details = db.movies().get_details(4).await.unwrap().unwrap();
        assert_eq!(details.num_reviews, 1);
        assert_eq!(details.avg_rating, 0.0);
        assert!(details.has_reviews());
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_backend_error() {
        let mut db = fixture_db().await;
        let before = db.stats().count_reviews().await.unwrap();

        // The schema's CHECK rejects it; the caller was supposed to validate.
        let err = db.reviews().add(5, 42).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
        assert_eq!(db.stats().count_reviews().await.unwrap(), before);
    }
}
