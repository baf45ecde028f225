//! # Interactive Session
//!
//! The numbered-command loop the tool starts in when no subcommand is given.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ** Welcome to the MovieLens app **                                    │
//! │  General stats: # of movies / # of reviews                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Please enter a command (1-5, x to exit): ◄────────────────┐           │
//! │       │                                                    │           │
//! │       ├── 1  search by title pattern                       │           │
//! │       ├── 2  movie details                                 │           │
//! │       ├── 3  top N by average rating                       │           │
//! │       ├── 4  add a review                                  │           │
//! │       ├── 5  set a tagline                                 │           │
//! │       ├── anything else: ignored ──────────────────────────┤           │
//! │       │   bad input / query error: "**message" ────────────┘           │
//! │       │                                                                 │
//! │       └── x or end of input → return                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so tests can drive a session with a
//! `Cursor` and capture everything it printed.

use std::io::{BufRead, Write};

use tracing::debug;

use movielens_core::validation::{
    parse_integer, parse_movie_id, validate_positive_count, validate_rating,
};
use movielens_core::ValidationError;
use movielens_db::Database;

use crate::error::{CliError, CliResult};
use crate::output::{thousands, write_details, write_movie_line, write_rating_line};

const COMMAND_PROMPT: &str = "Please enter a command (1-5, x to exit): ";
const NO_SUCH_MOVIE: &str = "No such movie...";

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Input ran out mid-command.
    Quit,
}

/// Reads one line; `None` at end of input.
macro_rules! ask {
    ($session:expr, $prompt:expr) => {
        match $session.prompt($prompt)? {
            Some(line) => line,
            None => return Ok(Flow::Quit),
        }
    };
}

/// One interactive session over a reader and a writer.
pub struct Session<R, W> {
    input: R,
    output: W,
    search_limit: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session. Searches with more than `search_limit` matches
    /// are counted but not listed.
    pub fn new(input: R, output: W, search_limit: usize) -> Self {
        Session {
            input,
            output,
            search_limit,
        }
    }

    /// Returns the writer, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the banner, the stats and the command loop until `x` or end of
    /// input.
    ///
    /// Only I/O failures on the session's own reader/writer end it early;
    /// everything else is printed and the loop continues.
    pub async fn run(&mut self, db: &mut Database) -> CliResult<()> {
        writeln!(self.output, "** Welcome to the MovieLens app **")?;
        writeln!(self.output)?;
        self.general_stats(db).await?;
        writeln!(self.output)?;

        while let Some(command) = self.prompt(COMMAND_PROMPT)? {
            let command = command.trim();
            if command == "x" {
                break;
            }

            let result = match command {
                "1" => self.search(db).await,
                "2" => self.details(db).await,
                "3" => self.top_rated(db).await,
                "4" => self.add_review(db).await,
                "5" => self.set_tagline(db).await,
                other => {
                    debug!(command = %other, "Ignoring unknown command");
                    Ok(Flow::Continue)
                }
            };

            let flow = match result {
                Ok(flow) => flow,
                Err(CliError::Io(err)) => return Err(CliError::Io(err)),
                Err(err) => {
                    writeln!(self.output, "**{}", err)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }

            writeln!(self.output)?;
        }

        self.output.flush()?;
        Ok(())
    }

    /// Writes a prompt and reads the reply without its line ending.
    fn prompt(&mut self, text: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    async fn general_stats(&mut self, db: &mut Database) -> CliResult<()> {
        writeln!(self.output, "General stats:")?;

        // Failures are already logged by the query layer.
        match db.stats().count_movies().await {
            Ok(count) => writeln!(self.output, " # of movies: {}", thousands(count))?,
            Err(_) => writeln!(self.output, "**No movies found...")?,
        }
        match db.stats().count_reviews().await {
            Ok(count) => writeln!(self.output, " # of reviews: {}", thousands(count))?,
            Err(_) => writeln!(self.output, "**No reviews found...")?,
        }
        Ok(())
    }

    /// Command 1.
    async fn search(&mut self, db: &mut Database) -> CliResult<Flow> {
        writeln!(self.output)?;
        let pattern = ask!(self, "Enter movie name (wildcards _ and % supported): ");

        let movies = db.movies().search_by_name(&pattern).await?;

        writeln!(self.output)?;
        writeln!(self.output, "# of movies found: {}", movies.len())?;

        if movies.len() > self.search_limit {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "There are too many movies to display, please narrow your search and try again..."
            )?;
            return Ok(Flow::Continue);
        }
        if movies.is_empty() {
            return Ok(Flow::Continue);
        }

        writeln!(self.output)?;
        for movie in &movies {
            write_movie_line(&mut self.output, movie)?;
        }
        Ok(Flow::Continue)
    }

    /// Command 2.
    async fn details(&mut self, db: &mut Database) -> CliResult<Flow> {
        writeln!(self.output)?;
        let movie_id = parse_movie_id(&ask!(self, "Enter movie id: "))?;

        let details = db.movies().get_details(movie_id).await?;

        writeln!(self.output)?;
        match details {
            Some(details) => write_details(&mut self.output, &details)?,
            None => writeln!(self.output, "{}", NO_SUCH_MOVIE)?,
        }
        Ok(Flow::Continue)
    }

    /// Command 3.
    async fn top_rated(&mut self, db: &mut Database) -> CliResult<Flow> {
        writeln!(self.output)?;

        let n = parse_integer("N", &ask!(self, "N? "))?;
        let n = match validate_positive_count("N", n) {
            Err(ValidationError::MustBePositive { .. }) => {
                writeln!(self.output, "Please enter a positive value for N...")?;
                return Ok(Flow::Continue);
            }
            other => other?,
        };

        let min_reviews = parse_integer(
            "min number of reviews",
            &ask!(self, "min number of reviews? "),
        )?;
        let min_reviews = match validate_positive_count("min number of reviews", min_reviews) {
            Err(ValidationError::MustBePositive { .. }) => {
                writeln!(
                    self.output,
                    "Please enter a positive value for min number of reviews..."
                )?;
                return Ok(Flow::Continue);
            }
            other => other?,
        };

        let movies = db.movies().top_rated(n, min_reviews).await?;
        if movies.is_empty() {
            return Ok(Flow::Continue);
        }

        writeln!(self.output)?;
        for movie in &movies {
            write_rating_line(&mut self.output, movie)?;
        }
        Ok(Flow::Continue)
    }

    /// Command 4.
    async fn add_review(&mut self, db: &mut Database) -> CliResult<Flow> {
        writeln!(self.output)?;

        let rating = parse_integer("rating", &ask!(self, "Enter rating (0..10): "))?;
        if validate_rating(rating).is_err() {
            writeln!(self.output, "Invalid rating...")?;
            return Ok(Flow::Continue);
        }

        let movie_id = parse_movie_id(&ask!(self, "Enter movie id: "))?;

        // A backend failure reads as "not applied", like a missing movie.
        let status = db
            .reviews()
            .add(movie_id, rating)
            .await
            .map_or(0, |outcome| outcome.status_code());

        writeln!(self.output)?;
        if status == 1 {
            writeln!(self.output, "Review successfully inserted")?;
        } else {
            writeln!(self.output, "{}", NO_SUCH_MOVIE)?;
        }
        Ok(Flow::Continue)
    }

    /// Command 5.
    async fn set_tagline(&mut self, db: &mut Database) -> CliResult<Flow> {
        writeln!(self.output)?;

        let tagline = ask!(self, "tagline? ");
        let movie_id = parse_movie_id(&ask!(self, "movie id? "))?;

        let status = db
            .taglines()
            .set(movie_id, &tagline)
            .await
            .map_or(0, |outcome| outcome.status_code());

        writeln!(self.output)?;
        if status == 1 {
            writeln!(self.output, "Tagline successfully set")?;
        } else {
            writeln!(self.output, "{}", NO_SUCH_MOVIE)?;
        }
        Ok(Flow::Continue)
    }
}
