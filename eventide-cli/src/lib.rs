//! Command-line interface for the Eventide recommendation engine.
//!
//! The binary exposes three subcommands that share one SQLite catalogue:
//!
//! - `seed` populates the catalogue with a reproducible mock dataset,
//! - `rank` prints ranked recommendations for a user as JSON,
//! - `log` records a view or registration and boosts event popularity.
//!
//! Every flag can also be supplied through layered configuration: a
//! configuration file or `EVENTIDE_`-prefixed environment variables, with
//! command-line values taking precedence.
#![forbid(unsafe_code)]

mod error;
mod rank;
mod record;
mod seed;

use camino::Utf8Path;
use clap::{Parser, Subcommand};

pub use error::CliError;

const ARG_DB: &str = "db";
const ARG_EMAIL: &str = "email";
const ARG_EVENT: &str = "event";
const ARG_KIND: &str = "kind";

const ENV_SEED_DB: &str = "EVENTIDE_CMDS_SEED_DB";
const ENV_RANK_DB: &str = "EVENTIDE_CMDS_RANK_DB";
const ENV_RANK_EMAIL: &str = "EVENTIDE_CMDS_RANK_EMAIL";
const ENV_LOG_DB: &str = "EVENTIDE_CMDS_LOG_DB";
const ENV_LOG_EMAIL: &str = "EVENTIDE_CMDS_LOG_EMAIL";
const ENV_LOG_EVENT: &str = "EVENTIDE_CMDS_LOG_EVENT";
const ENV_LOG_KIND: &str = "EVENTIDE_CMDS_LOG_KIND";

/// Top-level command-line interface definition.
#[derive(Debug, Parser)]
#[command(
    name = "eventide",
    about = "Seed, rank, and record interactions for an event catalogue",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Subcommands exposed by the binary.
#[derive(Debug, Subcommand)]
enum Command {
    /// Populate the catalogue with a reproducible mock dataset.
    Seed(seed::SeedArgs),
    /// Rank upcoming events for a user and print them as JSON.
    Rank(rank::RankArgs),
    /// Record a user interaction and boost the event's popularity.
    Log(record::LogArgs),
}

/// Parses arguments from the process environment and runs the requested
/// subcommand.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration loading, or
/// the selected command itself fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Seed(args) => seed::run_seed(args),
        Command::Rank(args) => rank::run_rank(args),
        Command::Log(args) => record::run_log(args),
    }
}

/// Rejects paths that do not name an existing file.
fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::MissingSourceFile {
            field,
            path: path.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests;
