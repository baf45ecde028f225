use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "movielens",
    author,
    version,
    about = "Query and annotate a MovieLens SQLite database."
)]
pub struct Cli {
    /// Path to the MovieLens database (overrides MOVIELENS_DB_PATH).
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Print results of one-shot commands as JSON.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub json: bool,

    /// Run one command and exit. Without it, an interactive session starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Number of movies and reviews.
    Stats,

    /// Movies whose title matches a pattern (wildcards _ and %).
    Search {
        pattern: String,
    },

    /// Everything known about one movie.
    Details {
        #[arg(allow_negative_numbers = true)]
        movie_id: i64,
    },

    /// Top N movies by average rating.
    Top {
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Only movies with at least this many reviews.
        #[arg(allow_negative_numbers = true)]
        min_reviews: i64,
    },

    /// Add a 0..10 rating to a movie.
    Review {
        #[arg(allow_negative_numbers = true)]
        movie_id: i64,

        #[arg(allow_negative_numbers = true)]
        rating: i64,
    },

    /// Set or replace a movie's tagline.
    Tagline {
        #[arg(allow_negative_numbers = true)]
        movie_id: i64,

        tagline: String,
    },
}
