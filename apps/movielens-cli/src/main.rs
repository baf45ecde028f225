//! MovieLens command-line entry point.
//!
//! All logic lives in the `movielens_cli` library.

use std::process::ExitCode;

use clap::Parser;

use movielens_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json && cli.command.is_some();

    match movielens_cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            movielens_cli::report_failure(&err, json);
            ExitCode::FAILURE
        }
    }
}
