//! `log` subcommand: record a user interaction and boost event popularity.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use eventide_core::{Interaction, InteractionKind, SqliteEventStore, UserStore};
use eventide_data::record_interaction;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DB, ARG_EMAIL, ARG_EVENT, ARG_KIND, CliError, ENV_LOG_DB, ENV_LOG_EMAIL, ENV_LOG_EVENT,
    ENV_LOG_KIND, require_existing,
};

/// CLI arguments for the `log` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    about = "Log a user interaction with an event",
    long_about = "Append a user interaction to the catalogue and boost the \
                  event's popularity score: views add one point, \
                  registrations add five."
)]
#[ortho_config(prefix = "EVENTIDE")]
pub(crate) struct LogArgs {
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) db: Option<Utf8PathBuf>,
    /// Email address identifying the acting user.
    #[arg(long = ARG_EMAIL, value_name = "email")]
    #[serde(default)]
    pub(crate) email: Option<String>,
    /// Identifier of the event interacted with.
    #[arg(long = ARG_EVENT, value_name = "id")]
    #[serde(default)]
    pub(crate) event: Option<u64>,
    /// Interaction kind: `view` or `register`.
    #[arg(long = ARG_KIND, value_name = "kind")]
    #[serde(default)]
    pub(crate) kind: Option<InteractionKind>,
}

impl LogArgs {
    /// Merges layered configuration and validates the result.
    fn into_config(self) -> Result<LogConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LogConfig::try_from(merged)
    }
}

/// Resolved `log` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogConfig {
    pub(crate) db: Utf8PathBuf,
    pub(crate) email: String,
    pub(crate) event: u64,
    pub(crate) kind: InteractionKind,
}

impl TryFrom<LogArgs> for LogConfig {
    type Error = CliError;

    fn try_from(args: LogArgs) -> Result<Self, Self::Error> {
        let db = args.db.ok_or(CliError::MissingArgument {
            field: ARG_DB,
            env: ENV_LOG_DB,
        })?;
        let email = args.email.ok_or(CliError::MissingArgument {
            field: ARG_EMAIL,
            env: ENV_LOG_EMAIL,
        })?;
        let event = args.event.ok_or(CliError::MissingArgument {
            field: ARG_EVENT,
            env: ENV_LOG_EVENT,
        })?;
        let kind = args.kind.ok_or(CliError::MissingArgument {
            field: ARG_KIND,
            env: ENV_LOG_KIND,
        })?;
        Ok(Self {
            db,
            email,
            event,
            kind,
        })
    }
}

/// Runs the `log` subcommand against stdout.
pub(super) fn run_log(args: LogArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_log_with(args, &mut stdout)
}

/// Records the configured interaction, confirming the boost on `writer`.
pub(super) fn run_log_with(args: LogArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.db, ARG_DB)?;
    let store = SqliteEventStore::open(&config.db)?;
    let user = store
        .find_by_email(&config.email)
        .ok_or_else(|| CliError::UnknownUser {
            email: config.email.clone(),
        })?;
    let interaction = Interaction::new(user.id, config.event, config.kind);
    let popularity = record_interaction(&config.db, &interaction).map_err(|source| {
        CliError::RecordInteraction {
            path: config.db.clone(),
            source,
        }
    })?;
    writeln!(
        writer,
        "logged {} by {} for event {}; popularity now {popularity}",
        config.kind, config.email, config.event
    )
    .map_err(CliError::WriteOutput)
}
