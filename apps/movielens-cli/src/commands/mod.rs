//! # One-Shot Commands
//!
//! Handlers for `movielens <subcommand>`. Each runs one query, renders it as
//! text or JSON, and returns. Not-found and bad input come back as errors so
//! the process exits non-zero.
//!
//! ## Command Categories
//!
//! ### Movies (`movie.rs`)
//! - `search` - Title pattern search
//! - `details` - One movie, fully assembled
//! - `top` - Top N by average rating
//!
//! ### Stats (`stats.rs`)
//! - `stats` - Movie and review counts
//!
//! ### Writes (`review.rs`, `tagline.rs`)
//! - `review` - Add a rating
//! - `tagline` - Set a tagline

pub mod movie;
pub mod review;
pub mod stats;
pub mod tagline;

use std::io::Write;

use serde::Serialize;

use movielens_core::{CoreError, WriteOutcome};
use movielens_db::Database;

use crate::cli::Command;
use crate::error::CliResult;

/// Runs one subcommand against an open database.
pub async fn dispatch<W: Write>(
    command: Command,
    db: &mut Database,
    out: &mut W,
    json: bool,
) -> CliResult<()> {
    match command {
        Command::Stats => stats::stats(db, out, json).await,
        Command::Search { pattern } => movie::search(db, &pattern, out, json).await,
        Command::Details { movie_id } => movie::details(db, movie_id, out, json).await,
        Command::Top { n, min_reviews } => movie::top(db, n, min_reviews, out, json).await,
        Command::Review { movie_id, rating } => {
            review::add_review(db, movie_id, rating, out, json).await
        }
        Command::Tagline { movie_id, tagline } => {
            tagline::set_tagline(db, movie_id, &tagline, out, json).await
        }
    }
}

/// JSON body for a successful write.
#[derive(Debug, Clone, Serialize)]
pub struct WriteReport {
    pub movie_id: i64,
    pub outcome: WriteOutcome,
}

/// Turns a write outcome into success or a not-found error.
pub(crate) fn require_applied(movie_id: i64, outcome: WriteOutcome) -> CliResult<WriteReport> {
    if !outcome.is_applied() {
        return Err(CoreError::MovieNotFound(movie_id).into());
    }
    Ok(WriteReport { movie_id, outcome })
}
