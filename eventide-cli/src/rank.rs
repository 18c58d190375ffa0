//! `rank` subcommand: print ranked recommendations for a user as JSON.

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use eventide_core::{RankRequest, RankResponse, Recommender, SqliteEventStore, UserStore};
use eventide_ranker::EventRanker;
use eventide_scorer::RelevanceEngine;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_DB, ARG_EMAIL, CliError, ENV_RANK_DB, ENV_RANK_EMAIL, require_existing};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    about = "Rank upcoming events for a user",
    long_about = "Resolve a user by email, score every upcoming event in the \
                  catalogue, and print the ranked list as JSON. Unknown \
                  emails produce an empty ranking rather than an error."
)]
#[ortho_config(prefix = "EVENTIDE")]
pub(crate) struct RankArgs {
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Email address identifying the user to rank for.
    #[arg(long = ARG_EMAIL, value_name = "email")]
    #[serde(default)]
    pub(crate) email: Option<String>,
    /// Rank as of this date instead of today (ISO `YYYY-MM-DD`).
    #[arg(long, value_name = "date")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
}

impl RankArgs {
    /// Merges layered configuration and validates the result.
    fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) db: Utf8PathBuf,
    pub(crate) email: String,
    pub(crate) date: Option<NaiveDate>,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let db = args.db.ok_or(CliError::MissingArgument {
            field: ARG_DB,
            env: ENV_RANK_DB,
        })?;
        let email = args.email.ok_or(CliError::MissingArgument {
            field: ARG_EMAIL,
            env: ENV_RANK_EMAIL,
        })?;
        Ok(Self {
            db,
            email,
            date: args.date,
        })
    }
}

/// Runs the `rank` subcommand against stdout.
pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

/// Ranks the catalogue for the configured user, writing JSON to `writer`.
pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.db, ARG_DB)?;
    let today = config
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let response = execute_rank(&config, today)?;
    write_response(writer, &response)
}

/// Builds the scoring pipeline over the catalogue and ranks it.
fn execute_rank(config: &RankConfig, today: NaiveDate) -> Result<RankResponse, CliError> {
    let store = Arc::new(SqliteEventStore::open(&config.db)?);
    let user = store.find_by_email(&config.email);
    let engine = RelevanceEngine::new(Arc::clone(&store), Arc::clone(&store));
    let ranker = EventRanker::new(store, engine);
    Ok(ranker.rank(&RankRequest { user, today }))
}

/// Serialises the response as pretty JSON followed by a newline.
fn write_response(writer: &mut dyn Write, response: &RankResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
