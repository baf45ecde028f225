//! Tagline command.

use std::io::Write;

use movielens_db::Database;

use crate::commands::require_applied;
use crate::error::CliResult;
use crate::output::write_json;

/// `movielens tagline <ID> <TEXT>`
pub async fn set_tagline<W: Write>(
    db: &mut Database,
    movie_id: i64,
    tagline: &str,
    out: &mut W,
    json: bool,
) -> CliResult<()> {
    let outcome = db.taglines().set(movie_id, tagline).await?;
    let report = require_applied(movie_id, outcome)?;

    if json {
        write_json(out, &report)?;
    } else {
        writeln!(out, "Tagline successfully set")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::fixture_db;

    #[tokio::test]
    async fn test_set_tagline() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        set_tagline(&mut db, 1, "A Los Angeles crime saga", &mut out, false)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Tagline successfully set\n");
        assert_eq!(
            db.taglines().get(1).await.unwrap().as_deref(),
            Some("A Los Angeles crime saga")
        );
    }

    #[tokio::test]
    async fn test_missing_movie() {
        let mut db = fixture_db().await;
        let mut out = Vec::new();
        let err = set_tagline(&mut db, 404, "x", &mut out, true).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(out.is_empty());
    }
}
