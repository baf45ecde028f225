//! Shell configuration.
//!
//! Loaded from environment variables with fallback to defaults. Command-line
//! flags override individual values afterwards.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use movielens_core::DEFAULT_SEARCH_DISPLAY_LIMIT;
use movielens_db::DbConfig;

/// Default log filter when neither `RUST_LOG` nor `MOVIELENS_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,sqlx=warn";

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite file with the MovieLens dataset
    pub db_path: PathBuf,

    /// Searches with more matches than this are not listed
    pub search_limit: usize,

    /// tracing-subscriber filter directive
    pub log_filter: String,

    /// SQLite busy timeout in seconds
    pub busy_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from("MovieLens.db"),
            search_limit: DEFAULT_SEARCH_DISPLAY_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            busy_timeout_secs: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    ///
    /// Unset keys fall back to [`AppConfig::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let search_limit = match lookup("MOVIELENS_SEARCH_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| ConfigError::InvalidValue("MOVIELENS_SEARCH_LIMIT".to_string()))?,
            None => defaults.search_limit,
        };

        let busy_timeout_secs = match lookup("MOVIELENS_BUSY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue("MOVIELENS_BUSY_TIMEOUT_SECS".to_string())
            })?,
            None => defaults.busy_timeout_secs,
        };

        let db_path = match lookup("MOVIELENS_DB_PATH") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("MOVIELENS_DB_PATH".to_string()))
            }
            Some(raw) => PathBuf::from(raw),
            None => defaults.db_path,
        };

        Ok(AppConfig {
            db_path,
            search_limit,
            log_filter: lookup("MOVIELENS_LOG").unwrap_or(defaults.log_filter),
            busy_timeout_secs,
        })
    }

    /// Database settings for the shell: the file must already exist.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
