//! Dataset statistics command.

use std::io::Write;

use serde::Serialize;

use movielens_db::Database;

use crate::error::CliResult;
use crate::output::{thousands, write_json};

/// JSON body for `stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub movies: i64,
    pub reviews: i64,
}

/// `movielens stats`
pub async fn stats<W: Write>(db: &mut Database, out: &mut W, json: bool) -> CliResult<()> {
    let report = StatsReport {
        movies: db.stats().count_movies().await?,
        reviews: db.stats().count_reviews().await?,
    };

    if json {
        write_json(out, &report)?;
        return Ok(());
    }

    writeln!(out, "General stats:")?;
    writeln!(out, " # of movies: {}", thousands(report.movies))?;
    writeln!(out, " # of reviews: {}", thousands(report.reviews))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_db;

    #[tokio::test]
    async fn test_stats_text() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        stats(&mut db, &mut out, false).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "General stats:\n # of movies: 3\n # of reviews: 1,002\n"
        );
    }

    #[tokio::test]
    async fn test_stats_json() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        stats(&mut db, &mut out, true).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!({ "movies": 3, "reviews": 1002 }));
    }
}
