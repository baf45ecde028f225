//! Movie lookup commands.

use std::io::Write;

use tracing::debug;

use movielens_core::validation::validate_positive_count;
use movielens_core::CoreError;
use movielens_db::Database;

use crate::error::CliResult;
use crate::output::{write_details, write_json, write_movie_line, write_rating_line};

/// `movielens search <PATTERN>`
///
/// Lists every match; the interactive display limit does not apply here.
pub async fn search<W: Write>(
    db: &mut Database,
    pattern: &str,
    out: &mut W,
    json: bool,
) -> CliResult<()> {
    let movies = db.movies().search_by_name(pattern).await?;
    debug!(pattern = %pattern, count = movies.len(), "Search command");

    if json {
        write_json(out, &movies)?;
        return Ok(());
    }

    writeln!(out, "# of movies found: {}", movies.len())?;
    for movie in &movies {
        write_movie_line(out, movie)?;
    }
    Ok(())
}

/// `movielens details <ID>`
pub async fn details<W: Write>(
    db: &mut Database,
    movie_id: i64,
    out: &mut W,
    json: bool,
) -> CliResult<()> {
    let details = db
        .movies()
        .get_details(movie_id)
        .await?
        .ok_or(CoreError::MovieNotFound(movie_id))?;

    if json {
        write_json(out, &details)?;
    } else {
        write_details(out, &details)?;
    }
    Ok(())
}

/// `movielens top <N> <MIN_REVIEWS>`
pub async fn top<W: Write>(
    db: &mut Database,
    n: i64,
    min_reviews: i64,
    out: &mut W,
    json: bool,
) -> CliResult<()> {
    let n = validate_positive_count("N", n)?;
    let min_reviews = validate_positive_count("min number of reviews", min_reviews)?;

    let movies = db.movies().top_rated(n, min_reviews).await?;

    if json {
        write_json(out, &movies)?;
        return Ok(());
    }

    for movie in &movies {
        write_rating_line(out, movie)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ErrorCode};
    use crate::test_support::fixture_db;

    #[tokio::test]
    async fn test_search_text() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        search(&mut db, "%", &mut out, false).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "# of movies found: 3\n1 : Heat (1995)\n2 : Star Wars (1977)\n3 : Toy Story (1995)\n"
        );
    }

    #[tokio::test]
    async fn test_details_json() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        details(&mut db, 2, &mut out, true).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["title"], "Star Wars");
        assert_eq!(value["num_reviews"], 3);
        assert_eq!(value["genres"], serde_json::json!(["Action", "Science Fiction"]));
    }

    #[tokio::test]
    async fn test_details_missing_is_not_found() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        let err = details(&mut db, 404, &mut out, false).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_top_validates_counts() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        let err = top(&mut db, 0, 1, &mut out, false).await.unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));

        top(&mut db, 1, 1, &mut out, false).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "2 : Star Wars (1977), avg rating =  9.00 (3 reviews)\n");
    }
}
