//! # Movie Repository
//!
//! Read-side queries over `Movies` and its satellite tables.
//!
//! ## Key Operations
//! - Title search with SQL `LIKE` wildcards
//! - Assembled details for one movie
//! - Top-rated ranking with a review-count floor
//!
//! ## Details Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_details(5)                                                         │
//! │                                                                         │
//! │  1. Movies            → id, title, date, runtime, language, money      │
//! │     (no row? → Ok(None), stop)                                         │
//! │  2. Ratings           → count, avg        (no ratings → 0, 0.0)        │
//! │  3. Movie_Taglines    → tagline           (none or NULL → "")          │
//! │  4. Companies join    → names A..Z        (stop at first NULL)         │
//! │  5. Genres join       → names A..Z        (stop at first NULL)         │
//! │                                                                         │
//! │  Each step is its own statement; aggregates are never cached.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::SqliteConnection;
use tracing::debug;

use movielens_core::{Movie, MovieDetails, MovieRating, TOP_N_CAP};

use crate::error::DbResult;
use crate::primitives::{fetch_many, fetch_one, log_mapping_failure};
use crate::repository::tagline::lookup_tagline;
use crate::value::SqlRow;

/// Repository for movie lookups.
///
/// ## Usage
/// ```rust,ignore
/// let hits = db.movies().search_by_name("Star%").await?;
/// let details = db.movies().get_details(5).await?;
/// let best = db.movies().top_rated(10, 100).await?;
/// ```
#[derive(Debug)]
pub struct MovieRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MovieRepository<'c> {
    /// Creates a new MovieRepository over the session connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        MovieRepository { conn }
    }

    /// Finds movies whose title matches a `LIKE` pattern.
    ///
    /// `_` matches one character and `%` any run of characters. Case
    /// sensitivity is the engine default (ASCII case-insensitive in SQLite).
    ///
    /// ## Returns
    /// Matches ordered by title ascending; empty when nothing matches.
    pub async fn search_by_name(&mut self, pattern: &str) -> DbResult<Vec<Movie>> {
        debug!(pattern = %pattern, "Searching movies by title");

        let rows = fetch_many(
            self.conn,
            r#"
            SELECT Movie_ID, Title, CAST(strftime('%Y', Release_Date) AS INTEGER)
            FROM Movies
            WHERE Title LIKE ?
            ORDER BY Title ASC
            "#,
            &[pattern.into()],
        )
        .await?;

        let movies = rows
            .iter()
            .map(|row| {
                Ok(Movie {
                    movie_id: row.i64_at(0)?,
                    title: row.text_at(1)?,
                    release_year: row.opt_i32_at(2)?,
                })
            })
            .collect::<DbResult<Vec<_>>>()
            .map_err(|e| log_mapping_failure("search_by_name", e))?;

        debug!(count = movies.len(), "Search returned movies");
        Ok(movies)
    }

    /// Assembles the full details of one movie.
    ///
    /// ## Returns
    /// * `Ok(Some(details))` - Movie exists
    /// * `Ok(None)` - No movie with this id
    pub async fn get_details(&mut self, movie_id: i64) -> DbResult<Option<MovieDetails>> {
        let Some(base) = fetch_one(
            self.conn,
            r#"
            SELECT Movie_ID, Title, date(Release_Date), Runtime,
                   Original_Language, Budget, Revenue
            FROM Movies
            WHERE Movie_ID = ?
            "#,
            &[movie_id.into()],
        )
        .await?
        else {
            debug!(movie_id, "No such movie");
            return Ok(None);
        };

        let ratings = fetch_one(
            self.conn,
            r#"
            SELECT count(Rating), avg(Rating)
            FROM Ratings
            WHERE Movie_ID = ?
            GROUP BY Movie_ID
            "#,
            &[movie_id.into()],
        )
        .await?;

        let tagline = lookup_tagline(self.conn, movie_id).await?.unwrap_or_default();

        let companies = fetch_many(
            self.conn,
            r#"
            SELECT Company_Name
            FROM Movie_Production_Companies
            INNER JOIN Companies
                ON Movie_Production_Companies.Company_ID = Companies.Company_ID
            WHERE Movie_Production_Companies.Movie_ID = ?
            ORDER BY Company_Name ASC
            "#,
            &[movie_id.into()],
        )
        .await?;

        let genres = fetch_many(
            self.conn,
            r#"
            SELECT Genre_Name
            FROM Movie_Genres
            INNER JOIN Genres ON Movie_Genres.Genre_ID = Genres.Genre_ID
            WHERE Movie_Genres.Movie_ID = ?
            ORDER BY Genre_Name ASC
            "#,
            &[movie_id.into()],
        )
        .await?;

        let details = assemble_details(&base, ratings.as_ref(), tagline, &genres, &companies)
            .map_err(|e| log_mapping_failure("get_details", e))?;
        Ok(Some(details))
    }

    /// Ranks movies by average rating.
    ///
    /// Only movies with at least `min_reviews` ratings qualify. Results are
    /// ordered by average descending and limited to `n`; fewer are returned
    /// when fewer qualify.
    ///
    /// ## Business Rule
    /// A request for [`TOP_N_CAP`] or more movies yields an empty list.
    pub async fn top_rated(&mut self, n: u32, min_reviews: u32) -> DbResult<Vec<MovieRating>> {
        if n >= TOP_N_CAP {
            debug!(n, cap = TOP_N_CAP, "Top-N request at or above cap");
            return Ok(Vec::new());
        }

        let rows = fetch_many(
            self.conn,
            r#"
            SELECT Movies.Movie_ID, Title, CAST(strftime('%Y', Release_Date) AS INTEGER),
                   avg(Rating), count(Rating)
            FROM Movies
            INNER JOIN Ratings ON Movies.Movie_ID = Ratings.Movie_ID
            GROUP BY Ratings.Movie_ID
            HAVING count(Rating) >= ?
            ORDER BY avg(Rating) DESC
            LIMIT ?
            "#,
            &[min_reviews.into(), n.into()],
        )
        .await?;

        rows.iter()
            .map(|row| {
                Ok(MovieRating {
                    movie_id: row.i64_at(0)?,
                    title: row.text_at(1)?,
                    release_year: row.opt_i32_at(2)?,
                    avg_rating: row.f64_at(3)?,
                    num_reviews: row.i64_at(4)?,
                })
            })
            .collect::<DbResult<Vec<_>>>()
            .map_err(|e| log_mapping_failure("top_rated", e))
    }
}

/// Maps the rows of the details queries into one record.
///
/// Runtime, budget and revenue may be stored as INTEGER or REAL.
fn assemble_details(
    base: &SqlRow,
    ratings: Option<&SqlRow>,
    tagline: String,
    genres: &[SqlRow],
    companies: &[SqlRow],
) -> DbResult<MovieDetails> {
    let (num_reviews, avg_rating) = match ratings {
        Some(row) => (row.i64_at(0)?, row.f64_at(1)?),
        None => (0, 0.0),
    };

    Ok(MovieDetails {
        movie_id: base.i64_at(0)?,
        title: base.text_at(1)?,
        num_reviews,
        avg_rating,
        release_date: base.opt_text_at(2)?,
        runtime: base.opt_quantity_at(3)?,
        original_language: base.opt_text_at(4)?,
        budget: base.opt_quantity_at(5)?,
        revenue: base.opt_quantity_at(6)?,
        tagline,
        genres: names_until_null(genres)?,
        production_companies: names_until_null(companies)?,
    })
}

/// Collects the name column of each row, stopping at the first NULL.
///
/// Rows after a NULL name are dropped even when they hold real names.
fn names_until_null(rows: &[SqlRow]) -> DbResult<Vec<String>> {
    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        match row.opt_text_at(0)? {
            Some(name) => names.push(name),
            None => break,
        }
    }
    Ok(names)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::primitives::execute;
    use crate::test_support::{empty_db, fixture_db};
    use crate::value::SqlValue;
    use movielens_core::Quantity;

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_search_wildcard_returns_all_sorted() {
        let mut db = fixture_db().await;
        let movies = db.movies().search_by_name("%").await.unwrap();

        assert_eq!(
            titles(&movies),
            vec!["Alien", "Heat", "Star Wars", "Toy Story", "Unreleased Project"]
        );
    }

    #[tokio::test]
    async fn test_search_maps_year() {
        let mut db = fixture_db().await;
        let movies = db.movies().search_by_name("%war%").await.unwrap();

        assert_eq!(
            movies,
            vec![Movie {
                movie_id: 5,
                title: "Star Wars".to_string(),
                release_year: Some(1977),
            }]
        );

        let unreleased = db.movies().search_by_name("Unreleased%").await.unwrap();
        assert_eq!(unreleased[0].release_year, None);
    }

    #[tokio::test]
    async fn test_search_single_char_wildcard() {
        let mut db = fixture_db().await;
        let movies = db.movies().search_by_name("H_at").await.unwrap();
        assert_eq!(titles(&movies), vec!["Heat"]);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty() {
        let mut db = fixture_db().await;
        let movies = db.movies().search_by_name("zzz%").await.unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn test_details_full_record() {
        let mut db = fixture_db().await;
        let details = db.movies().get_details(5).await.unwrap().unwrap();

        assert_eq!(details.movie_id, 5);
        assert_eq!(details.title, "Star Wars");
        assert_eq!(details.num_reviews, 3);
        assert!((details.avg_rating - 9.0).abs() < 1e-9);
        assert_eq!(details.release_date.as_deref(), Some("1977-05-25"));
        assert_eq!(details.runtime, Some(Quantity::Whole(121)));
        assert_eq!(details.original_language.as_deref(), Some("en"));
        assert_eq!(details.budget, Some(Quantity::Whole(11_000_000)));
        assert_eq!(details.revenue, Some(Quantity::Whole(775_398_007)));
        assert_eq!(details.tagline, "A long time ago in a galaxy far, far away...");
        assert_eq!(details.genres, vec!["Action", "Adventure", "Science Fiction"]);
        assert_eq!(
            details.production_companies,
            vec!["Lucasfilm", "Twentieth Century Fox"]
        );
    }

    #[tokio::test]
    async fn test_details_absent_id_is_none() {
        let mut db = fixture_db().await;
        assert!(db.movies().get_details(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_details_returns_requested_id() {
        let mut db = fixture_db().await;
        for id in 1..=5 {
            let details = db.movies().get_details(id).await.unwrap().unwrap();
            assert_eq!(details.movie_id, id);
        }
    }

    #[tokio::test]
    async fn test_details_defaults_for_sparse_movie() {
        let mut db = fixture_db().await;
        let details = db.movies().get_details(4).await.unwrap().unwrap();

        assert_eq!(details.num_reviews, 0);
        assert_eq!(details.avg_rating, 0.0);
        assert!(!details.has_reviews());
        assert_eq!(details.release_date, None);
        assert_eq!(details.runtime, None);
        assert_eq!(details.budget, None);
        assert_eq!(details.tagline, "");
        assert!(details.genres.is_empty());
        assert!(details.production_companies.is_empty());
    }

    #[tokio::test]
    async fn test_details_accepts_real_valued_numbers() {
        let mut db = fixture_db().await;
        execute(
            db.connection(),
            "INSERT INTO Movies VALUES (7, 'Odd', '2001-01-01', 95.5, 'en', 1.5e6, NULL)",
            &[],
        )
        .await
        .unwrap();

        let details = db.movies().get_details(7).await.unwrap().unwrap();
        assert_eq!(details.runtime, Some(Quantity::Fractional(95.5)));
        assert_eq!(details.budget, Some(Quantity::Whole(1_500_000)));
        assert_eq!(details.revenue, None);
    }

    #[tokio::test]
    async fn test_details_text_in_numeric_column_is_decode_error() {
        let mut db = fixture_db().await;
        execute(
            db.connection(),
            "INSERT INTO Movies VALUES (8, 'Garbled', NULL, 'long', 'en', NULL, NULL)",
            &[],
        )
        .await
        .unwrap();

        let err = db.movies().get_details(8).await.unwrap_err();
        assert!(matches!(err, DbError::Decode { index: 3, .. }));

        // Other lookups on the same connection keep working.
        assert!(db.movies().get_details(5).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_details_null_tagline_is_empty_string() {
        let mut db = fixture_db().await;
        let heat = db.movies().get_details(1).await.unwrap().unwrap();
        assert_eq!(heat.tagline, "");

        let toy_story = db.movies().get_details(3).await.unwrap().unwrap();
        assert_eq!(toy_story.tagline, "");
        assert_eq!(toy_story.production_companies, vec!["Pixar"]);
    }

    #[tokio::test]
    async fn test_details_genres_truncate_at_null() {
        let mut db = fixture_db().await;
        // NULL sorts first, so the named genre behind it is dropped.
        let alien = db.movies().get_details(2).await.unwrap().unwrap();
        assert!(alien.genres.is_empty());
    }

    #[test]
    fn test_names_until_null() {
        let rows: Vec<SqlRow> = vec![
            vec![SqlValue::from("Action")].into(),
            vec![SqlValue::from("Drama")].into(),
            vec![SqlValue::Null].into(),
            vec![SqlValue::from("Western")].into(),
        ];
        assert_eq!(names_until_null(&rows).unwrap(), vec!["Action", "Drama"]);
        assert!(names_until_null(&[]).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_rated_orders_by_average() {
        let mut db = fixture_db().await;
        let top = db.movies().top_rated(10, 1).await.unwrap();

        let ids: Vec<i64> = top.iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![2, 5, 1, 3]);
        assert!(top.windows(2).all(|w| w[0].avg_rating >= w[1].avg_rating));

        let star_wars = &top[1];
        assert_eq!(star_wars.num_reviews, 3);
        assert!((star_wars.avg_rating - 9.0).abs() < 1e-9);
        assert_eq!(star_wars.release_year, Some(1977));
    }

    #[tokio::test]
    async fn test_top_rated_respects_min_reviews() {
        let mut db = fixture_db().await;
        let top = db.movies().top_rated(10, 3).await.unwrap();

        assert!(top.iter().all(|m| m.num_reviews >= 3));
        let ids: Vec<i64> = top.iter().map(|m| m.movie_id).collect();
        assert_eq!(ids, vec![5, 3]);
    }

    #[tokio::test]
    async fn test_top_rated_limits_without_padding() {
        let mut db = fixture_db().await;
        assert_eq!(db.movies().top_rated(2, 1).await.unwrap().len(), 2);
        // Only four movies have ratings.
        assert_eq!(db.movies().top_rated(50, 1).await.unwrap().len(), 4);
        assert!(db.movies().top_rated(10, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_rated_cap() {
        let mut db = fixture_db().await;
        assert!(db.movies().top_rated(1000, 1).await.unwrap().is_empty());
        assert!(db.movies().top_rated(5000, 1).await.unwrap().is_empty());
        assert_eq!(db.movies().top_rated(999, 1).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_queries_on_empty_database() {
        let mut db = empty_db().await;
        assert!(db.movies().search_by_name("%").await.unwrap().is_empty());
        assert!(db.movies().get_details(1).await.unwrap().is_none());
        assert!(db.movies().top_rated(10, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_table_is_error() {
        let mut db = crate::Database::open(crate::DbConfig::in_memory())
            .await
            .unwrap();
        assert!(db.movies().search_by_name("%").await.is_err());
        assert!(db.movies().get_details(1).await.is_err());
    }
}
