//! Error types surfaced by the command-line interface.
//!
//! Every variant names a failure an operator can act on: the `Display`
//! output is the last line the binary prints before exiting.

use std::sync::Arc;

use camino::Utf8PathBuf;
use eventide_core::SqliteEventStoreError;
use eventide_data::{PersistCatalogueError, RecordInteractionError};
use thiserror::Error;

/// Errors returned by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Command-line arguments failed to parse.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Layered configuration could not be loaded or merged.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required value was absent from every configuration layer.
    #[error("missing required argument `{field}`; pass --{field} or set {env}")]
    MissingArgument {
        /// Name of the absent command-line flag.
        field: &'static str,
        /// Environment variable that can supply the value instead.
        env: &'static str,
    },
    /// An input path does not point at an existing file.
    #[error("`--{field}` does not exist or is not a file: {path}")]
    MissingSourceFile {
        /// Name of the flag holding the offending path.
        field: &'static str,
        /// The path that failed the check.
        path: Utf8PathBuf,
    },
    /// The catalogue database could not be opened or read.
    #[error(transparent)]
    OpenStore(#[from] SqliteEventStoreError),
    /// Seeded rows could not be written to the catalogue database.
    #[error("failed to persist the catalogue to {path}")]
    PersistCatalogue {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Underlying persistence failure.
        #[source]
        source: PersistCatalogueError,
    },
    /// The interaction could not be recorded in the catalogue.
    #[error("failed to record the interaction in {path}")]
    RecordInteraction {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Underlying persistence failure.
        #[source]
        source: RecordInteractionError,
    },
    /// No user in the catalogue matches the supplied email address.
    #[error("no user found for email {email}")]
    UnknownUser {
        /// The email address that failed to resolve.
        email: String,
    },
    /// The ranking response could not be serialised to JSON.
    #[error("failed to serialise the response")]
    SerialiseResponse(#[source] serde_json::Error),
    /// Output could not be written to the destination stream.
    #[error("failed to write output")]
    WriteOutput(#[source] std::io::Error),
}
