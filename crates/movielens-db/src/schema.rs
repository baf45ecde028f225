//! # Development Schema
//!
//! `CREATE TABLE IF NOT EXISTS` bootstrap for the MovieLens relations, used
//! by the seed tool and the tests. The real dataset ships with its own
//! schema; this is not a migration system and never alters existing tables.
//!
//! ## Relations
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌────────────────────────────┐
//! │   Movies     │◄─────│   Ratings    │      │      Movie_Taglines        │
//! │  Movie_ID PK │      │  Movie_ID    │      │  Movie_ID PK → Movies      │
//! │  Title       │      │  Rating 0-10 │      │  Tagline                   │
//! │  Release_Date│      └──────────────┘      └────────────────────────────┘
//! │  Runtime ... │
//! └──────┬───────┘
//!        │        ┌──────────────┐   ┌──────────────┐
//!        ├───────►│ Movie_Genres │──►│   Genres     │
//!        │        └──────────────┘   └──────────────┘
//!        │        ┌────────────────────────────┐   ┌──────────────┐
//!        └───────►│ Movie_Production_Companies │──►│  Companies   │
//!                 └────────────────────────────┘   └──────────────┘
//! ```

use sqlx::sqlite::SqliteConnection;
use tracing::info;

use crate::error::DbResult;
use crate::primitives::execute;

/// Table definitions, in dependency order.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS Movies (
        Movie_ID          INTEGER PRIMARY KEY,
        Title             TEXT NOT NULL,
        Release_Date      TEXT,
        Runtime           INTEGER,
        Original_Language TEXT,
        Budget            INTEGER,
        Revenue           INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Ratings (
        Movie_ID INTEGER NOT NULL REFERENCES Movies (Movie_ID),
        Rating   INTEGER NOT NULL CHECK (Rating BETWEEN 0 AND 10)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Movie_Taglines (
        Movie_ID INTEGER PRIMARY KEY REFERENCES Movies (Movie_ID),
        Tagline  TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Genres (
        Genre_ID   INTEGER PRIMARY KEY,
        Genre_Name TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Movie_Genres (
        Movie_ID INTEGER NOT NULL REFERENCES Movies (Movie_ID),
        Genre_ID INTEGER NOT NULL REFERENCES Genres (Genre_ID)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Companies (
        Company_ID   INTEGER PRIMARY KEY,
        Company_Name TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Movie_Production_Companies (
        Movie_ID   INTEGER NOT NULL REFERENCES Movies (Movie_ID),
        Company_ID INTEGER NOT NULL REFERENCES Companies (Company_ID)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_ratings_movie ON Ratings (Movie_ID)",
];

/// Creates every table that does not exist yet.
///
/// Idempotent: running it against a populated database changes nothing.
pub async fn create_schema(conn: &mut SqliteConnection) -> DbResult<()> {
    for ddl in TABLES {
        execute(conn, ddl, &[]).await?;
    }
    info!(statements = TABLES.len(), "Schema ensured");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Database, DbConfig};
    use crate::primitives::fetch_many;

    #[tokio::test]
    async fn test_create_schema_creates_all_tables() {
        let mut db = Database::open(DbConfig::in_memory()).await.unwrap();
        create_schema(db.connection()).await.unwrap();

        let rows = fetch_many(
            db.connection(),
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
            &[],
        )
        .await
        .unwrap();
        let names: Vec<String> = rows.iter().map(|r| r.text_at(0).unwrap()).collect();

        assert_eq!(
            names,
            vec![
                "Companies",
                "Genres",
                "Movie_Genres",
                "Movie_Production_Companies",
                "Movie_Taglines",
                "Movies",
                "Ratings",
            ]
        );
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let mut db = Database::open(DbConfig::in_memory()).await.unwrap();
        create_schema(db.connection()).await.unwrap();
        execute(
            db.connection(),
            "INSERT INTO Movies (Movie_ID, Title) VALUES (1, 'Heat')",
            &[],
        )
        .await
        .unwrap();

        create_schema(db.connection()).await.unwrap();

        let rows = fetch_many(db.connection(), "SELECT Title FROM Movies", &[])
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_rating_range_is_enforced() {
        let mut db = Database::open(DbConfig::in_memory()).await.unwrap();
        create_schema(db.connection()).await.unwrap();
        execute(
            db.connection(),
            "INSERT INTO Movies (Movie_ID, Title) VALUES (1, 'Heat')",
            &[],
        )
        .await
        .unwrap();

        let err = execute(
            db.connection(),
            "INSERT INTO Ratings (Movie_ID, Rating) VALUES (1, 11)",
            &[],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, crate::DbError::ConstraintViolation { .. }));
    }
}
