//! Review command.

use std::io::Write;

use tracing::info;

use movielens_core::validation::validate_rating;
use movielens_db::Database;

use crate::commands::require_applied;
use crate::error::CliResult;
use crate::output::write_json;

/// `movielens review <ID> <RATING>`
pub async fn add_review<W: Write>(
    db: &mut Database,
    movie_id: i64,
    rating: i64,
    out: &mut W,
    json: bool,
) -> CliResult<()> {
    let rating = validate_rating(rating)?;

    let outcome = db.reviews().add(movie_id, rating).await?;
    let report = require_applied(movie_id, outcome)?;
    info!(movie_id, rating, "Review recorded from command line");

    if json {
        write_json(out, &report)?;
    } else {
        writeln!(out, "Review successfully inserted")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ErrorCode};
    use crate::test_support::fixture_db;

    #[tokio::test]
    async fn test_add_review() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        add_review(&mut db, 2, 5, &mut out, true).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!({ "movie_id": 2, "outcome": "applied" }));

        let details = db.movies().get_details(2).await.unwrap().unwrap();
        assert_eq!(details.num_reviews, 4);
    }

    #[tokio::test]
    async fn test_invalid_rating_never_reaches_database() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        let err = add_review(&mut db, 2, 11, &mut out, false).await.unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(db.stats().count_reviews().await.unwrap(), 1002);
    }

    #[tokio::test]
    async fn test_missing_movie() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        let err = add_review(&mut db, 404, 5, &mut out, false).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
