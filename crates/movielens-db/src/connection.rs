//! # Database Connection
//!
//! Opening, checking and closing the one SQLite connection a session uses.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Single-Connection Session                          │
//! │                                                                         │
//! │  Shell Startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure connection settings                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open(config).await                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │        Database { SqliteConnection }    │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ &mut borrow per call                                            │
//! │       ▼                                                                 │
//! │  db.movies().search_by_name(..)  ──► done                              │
//! │  db.reviews().add(..)            ──► done                              │
//! │  db.stats().count_movies()       ──► done                              │
//! │  (one operation at a time; the borrow checker enforces it)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::{MovieRepository, ReviewRepository, StatsRepository, TaglineRepository};

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Connection configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use movielens_db::DbConfig;
///
/// let config = DbConfig::new("MovieLens.db")
///     .busy_timeout(Duration::from_secs(2))
///     .create_if_missing(false);
/// assert!(!config.create_if_missing);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Create the file when it does not exist.
    /// Default: false (the shell expects an existing dataset)
    pub create_if_missing: bool,

    /// How long a statement waits on a locked database.
    /// Default: 5 seconds
    pub busy_timeout: Duration,
}

impl DbConfig {
    /// Creates a configuration for an existing database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            create_if_missing: false,
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Sets whether a missing file is created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Each `Database` opened from it is a fresh, empty database.
    pub fn in_memory() -> Self {
        DbConfig::new(MEMORY_PATH)
    }

    /// Returns true for the in-memory configuration.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(self.create_if_missing)
        };

        // Ratings and taglines must reference an existing movie.
        Ok(options.foreign_keys(true).busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Owns the session's connection and hands out repositories.
///
/// Repositories borrow the connection mutably, so only one can be alive at
/// a time:
///
/// ```rust,ignore
/// let mut db = Database::open(DbConfig::new("MovieLens.db")).await?;
///
/// let total = db.stats().count_movies().await?;
/// let hits = db.movies().search_by_name("%Star%").await?;
///
/// db.close().await?;
/// ```
#[derive(Debug)]
pub struct Database {
    conn: SqliteConnection,
}

impl Database {
    /// Opens the database.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use handle
    /// * `Err(DbError::ConnectionFailed)` - Missing file (when creation is
    ///   disabled), bad permissions, not a database
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening database connection"
        );

        let conn = config
            .connect_options()?
            .connect()
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(
            busy_timeout_ms = config.busy_timeout.as_millis() as u64,
            "Database connection ready"
        );

        Ok(Database { conn })
    }

    /// Returns the raw connection.
    ///
    /// ## Usage
    /// For the primitives directly. Prefer the repositories.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Returns the movie repository.
    pub fn movies(&mut self) -> MovieRepository<'_> {
        MovieRepository::new(&mut self.conn)
    }

    /// Returns the review repository.
    pub fn reviews(&mut self) -> ReviewRepository<'_> {
        ReviewRepository::new(&mut self.conn)
    }

    /// Returns the tagline repository.
    pub fn taglines(&mut self) -> TaglineRepository<'_> {
        TaglineRepository::new(&mut self.conn)
    }

    /// Returns the stats repository.
    pub fn stats(&mut self) -> StatsRepository<'_> {
        StatsRepository::new(&mut self.conn)
    }

    /// Checks if the database is healthy (can execute queries).
    ///
    /// ## Returns
    /// * `true` - Database is responsive
    /// * `false` - Database is unavailable
    pub async fn health_check(&mut self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&mut self.conn)
            .await
            .is_ok()
    }

    /// Closes the connection.
    ///
    /// Consumes the handle, so nothing can use the connection afterwards.
    pub async fn close(self) -> DbResult<()> {
        info!("Closing database connection");
        self.conn
            .close()
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
