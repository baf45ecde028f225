//! # movielens-cli: MovieLens Command-Line Shell
//!
//! The presentation layer: parses arguments, loads configuration, opens the
//! database, and either runs one subcommand or an interactive session.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shell Startup                                        │
//! │                                                                         │
//! │  1. Parse arguments (clap) ───────────────────────────────────────────► │
//! │                                                                         │
//! │  2. Load AppConfig from MOVIELENS_* env, apply --db ──────────────────► │
//! │                                                                         │
//! │  3. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, to stderr                     │
//! │     • RUST_LOG wins, then MOVIELENS_LOG, then "warn,sqlx=warn"          │
//! │                                                                         │
//! │  4. Start a current-thread tokio runtime ─────────────────────────────► │
//! │                                                                         │
//! │  5. Open the database (must exist) ───────────────────────────────────► │
//! │                                                                         │
//! │  6. Subcommand? run it : interactive session on stdin/stdout ─────────► │
//! │                                                                         │
//! │  7. Close the database ───────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod interactive;
pub mod output;

#[cfg(test)]
pub(crate) mod test_support;

use std::io::{self, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use movielens_db::{Database, DbResult};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::interactive::Session;

/// Runs the shell for already-parsed arguments.
pub fn run(cli: Cli) -> CliResult<()> {
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.db.clone() {
        config.db_path = path;
    }

    init_tracing(&config.log_filter);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_session(cli, config))
}

async fn run_session(cli: Cli, config: AppConfig) -> CliResult<()> {
    info!(path = %config.db_path.display(), "Starting MovieLens shell");

    let mut db = Database::open(config.db_config()).await?;

    let result = match cli.command {
        Some(command) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let result = commands::dispatch(command, &mut db, &mut out, cli.json).await;
            out.flush()?;
            result
        }
        None => {
            let mut session = Session::new(
                io::stdin().lock(),
                io::stdout().lock(),
                config.search_limit,
            );
            session.run(&mut db).await
        }
    };

    let closed = db.close().await;
    finish(result, closed)
}

/// Combines the session result with the result of closing the database.
///
/// A session error wins; a close failure after it is only logged.
fn finish(result: CliResult<()>, closed: DbResult<()>) -> CliResult<()> {
    match (result, closed) {
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "Closing the database failed after an earlier error");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), closed) => closed.map_err(CliError::from),
    }
}

/// Prints a failure the way the invocation asked for.
///
/// With `--json` on a one-shot command the error goes to stdout as
/// `{"code": ..., "message": ...}`; otherwise to stderr as text.
pub fn report_failure(err: &CliError, json: bool) {
    if json {
        if let Ok(body) = serde_json::to_string(&err.report()) {
            println!("{}", body);
            return;
        }
    }
    eprintln!("error: {}", err);
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (query decisions)
/// - `MOVIELENS_LOG=info` - Same, without touching `RUST_LOG`
/// - Default: warnings and errors only
///
/// Logs go to stderr so prompts and results on stdout stay clean.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
