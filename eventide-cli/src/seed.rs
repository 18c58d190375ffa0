//! `seed` subcommand: generate and persist a reproducible mock catalogue.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use eventide_data::mock;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_DB, CliError, ENV_SEED_DB};

/// RNG seed used when none is supplied.
const DEFAULT_SEED: u64 = 42;

/// CLI arguments for the `seed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    about = "Populate the catalogue with a mock dataset",
    long_about = "Generate a deterministic mock catalogue of upcoming events \
                  and demo users, then persist it to the SQLite database. \
                  Re-seeding the same path replaces existing rows."
)]
#[ortho_config(prefix = "EVENTIDE")]
pub(crate) struct SeedArgs {
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// RNG seed controlling the generated catalogue.
    #[arg(long, value_name = "u64")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Number of events to generate.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
}

impl SeedArgs {
    /// Merges layered configuration and validates the result.
    fn into_config(self) -> Result<SeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SeedConfig::try_from(merged)
    }
}

/// Resolved `seed` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeedConfig {
    pub(crate) db: Utf8PathBuf,
    pub(crate) seed: u64,
    pub(crate) count: usize,
}

impl TryFrom<SeedArgs> for SeedConfig {
    type Error = CliError;

    fn try_from(args: SeedArgs) -> Result<Self, Self::Error> {
        let db = args.db.ok_or(CliError::MissingArgument {
            field: ARG_DB,
            env: ENV_SEED_DB,
        })?;
        Ok(Self {
            db,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            count: args.count.unwrap_or(mock::EVENTS_PER_RUN),
        })
    }
}

/// Runs the `seed` subcommand against stdout with the local date.
pub(super) fn run_seed(args: SeedArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_seed_with(args, chrono::Local::now().date_naive(), &mut stdout)
}

/// Seeds the catalogue as of `today`, reporting a summary on `writer`.
pub(super) fn run_seed_with(
    args: SeedArgs,
    today: NaiveDate,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let (events, users) = mock::catalogue(config.seed, config.count, today);
    eventide_data::persist_catalogue(&config.db, &events, &users).map_err(|source| {
        CliError::PersistCatalogue {
            path: config.db.clone(),
            source,
        }
    })?;
    writeln!(
        writer,
        "seeded {} events and {} users into {}",
        events.len(),
        users.len(),
        config.db
    )
    .map_err(CliError::WriteOutput)
}
