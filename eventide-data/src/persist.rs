//! SQLite persistence for the event catalogue and interaction log.

use camino::{Utf8Path, Utf8PathBuf};
use eventide_core::{Event, Interaction, User};
use rusqlite::{Connection, Error as SqliteError, OptionalExtension, Transaction, params};
use serde_json::to_string;
use thiserror::Error;

const CREATE_EVENTS_SQL: &str = "CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    category TEXT NOT NULL,
    tags TEXT,
    location TEXT,
    mode TEXT NOT NULL,
    date TEXT,
    coding_impact_score INTEGER,
    communication_impact_score INTEGER,
    popularity_score INTEGER
)";

const CREATE_USERS_SQL: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    interests TEXT,
    skills TEXT,
    location TEXT,
    coding_preference REAL,
    communication_preference REAL
)";

const CREATE_INTERACTIONS_SQL: &str = "CREATE TABLE IF NOT EXISTS interactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    event_id INTEGER NOT NULL,
    kind TEXT NOT NULL
)";

const INSERT_EVENT_SQL: &str = "INSERT OR REPLACE INTO events (id, title, description, category, \
     tags, location, mode, date, coding_impact_score, communication_impact_score, \
     popularity_score) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

const INSERT_USER_SQL: &str = "INSERT OR REPLACE INTO users (id, email, interests, skills, \
     location, coding_preference, communication_preference) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// Errors raised when persisting a catalogue to SQLite.
#[derive(Debug, Error)]
pub enum PersistCatalogueError {
    /// Failed to create the parent directory for the SQLite artefact.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Enabling SQLite foreign keys failed.
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin catalogue persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating a catalogue table failed.
    #[error("failed to create {table} table")]
    CreateSchema {
        /// Name of the table that could not be created.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Preparing an insert statement failed.
    #[error("failed to prepare catalogue insert statement")]
    PrepareInsert {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// An identifier could not be represented as an SQLite integer.
    #[error("id {id} exceeds SQLite i64 range")]
    IdOutOfRange {
        /// Identifier that failed the conversion.
        id: u64,
    },
    /// Serialising event tags to JSON failed.
    #[error("failed to serialise tags for event {event_id}")]
    SerialiseTags {
        /// Identifier of the event whose tags failed to serialise.
        event_id: u64,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Serialising user interests to JSON failed.
    #[error("failed to serialise interests for user {user_id}")]
    SerialiseInterests {
        /// Identifier of the user whose interests failed to serialise.
        user_id: u64,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Serialising user skills to JSON failed.
    #[error("failed to serialise skills for user {user_id}")]
    SerialiseSkills {
        /// Identifier of the user whose skills failed to serialise.
        user_id: u64,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing an event row failed.
    #[error("failed to persist event {event_id}")]
    PersistEvent {
        /// Identifier of the event being persisted.
        event_id: u64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a user row failed.
    #[error("failed to persist user {user_id}")]
    PersistUser {
        /// Identifier of the user being persisted.
        user_id: u64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit catalogue persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Persist an event catalogue and its users to a SQLite database on disk.
///
/// The function is idempotent: rows are replaced when identifiers already
/// exist. Parent directories are created automatically, and the catalogue
/// tables are initialised if missing. Tag and interest sets are serialised
/// to JSON strings, dates to ISO `YYYY-MM-DD` text.
///
/// # Errors
/// Returns [`PersistCatalogueError`] when the filesystem or database refuse
/// the write, or when a row cannot be represented in SQLite.
pub fn persist_catalogue(
    path: &Utf8Path,
    events: &[Event],
    users: &[User],
) -> Result<(), PersistCatalogueError> {
    ensure_parent_dir(path)?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistCatalogueError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| PersistCatalogueError::ForeignKeys { source })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistCatalogueError::BeginTransaction { source })?;

    create_schema(&transaction)?;
    persist_events(&transaction, events)?;
    persist_users(&transaction, users)?;

    transaction
        .commit()
        .map_err(|source| PersistCatalogueError::Commit { source })?;
    log::debug!(
        "persisted {} events and {} users to {path}",
        events.len(),
        users.len(),
    );
    Ok(())
}

fn ensure_parent_dir(path: &Utf8Path) -> Result<(), PersistCatalogueError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    std::fs::create_dir_all(parent.as_std_path()).map_err(|source| {
        PersistCatalogueError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        }
    })
}

fn create_schema(transaction: &Transaction<'_>) -> Result<(), PersistCatalogueError> {
    let tables = [
        ("events", CREATE_EVENTS_SQL),
        ("users", CREATE_USERS_SQL),
        ("interactions", CREATE_INTERACTIONS_SQL),
    ];
    for (table, sql) in tables {
        transaction
            .execute(sql, [])
            .map(|_| ())
            .map_err(|source| PersistCatalogueError::CreateSchema { table, source })?;
    }
    Ok(())
}

fn persist_events(
    transaction: &Transaction<'_>,
    events: &[Event],
) -> Result<(), PersistCatalogueError> {
    if events.is_empty() {
        return Ok(());
    }

    let mut statement = transaction
        .prepare(INSERT_EVENT_SQL)
        .map_err(|source| PersistCatalogueError::PrepareInsert { source })?;

    for event in events {
        let event_id = i64::try_from(event.id)
            .map_err(|_| PersistCatalogueError::IdOutOfRange { id: event.id })?;
        let tags = to_string(&event.tags).map_err(|source| PersistCatalogueError::SerialiseTags {
            event_id: event.id,
            source,
        })?;
        statement
            .execute(params![
                event_id,
                event.title,
                event.description,
                event.category.as_str(),
                tags,
                event.location,
                event.mode.as_str(),
                event.date.map(|date| date.to_string()),
                event.coding_impact_score,
                event.communication_impact_score,
                event.popularity_score,
            ])
            .map_err(|source| PersistCatalogueError::PersistEvent {
                event_id: event.id,
                source,
            })?;
    }

    Ok(())
}

fn persist_users(
    transaction: &Transaction<'_>,
    users: &[User],
) -> Result<(), PersistCatalogueError> {
    if users.is_empty() {
        return Ok(());
    }

    let mut statement = transaction
        .prepare(INSERT_USER_SQL)
        .map_err(|source| PersistCatalogueError::PrepareInsert { source })?;

    for user in users {
        let user_id = i64::try_from(user.id)
            .map_err(|_| PersistCatalogueError::IdOutOfRange { id: user.id })?;
        let interests = to_string(&user.interests).map_err(|source| {
            PersistCatalogueError::SerialiseInterests {
                user_id: user.id,
                source,
            }
        })?;
        let skills =
            to_string(&user.skills).map_err(|source| PersistCatalogueError::SerialiseSkills {
                user_id: user.id,
                source,
            })?;
        statement
            .execute(params![
                user_id,
                user.email,
                interests,
                skills,
                user.location,
                user.coding_preference.value(),
                user.communication_preference.value(),
            ])
            .map_err(|source| PersistCatalogueError::PersistUser {
                user_id: user.id,
                source,
            })?;
    }

    Ok(())
}

/// Errors raised when appending to the interaction log.
#[derive(Debug, Error)]
pub enum RecordInteractionError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// An identifier could not be represented as an SQLite integer.
    #[error("id {id} exceeds SQLite i64 range")]
    IdOutOfRange {
        /// Identifier that failed the conversion.
        id: u64,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin interaction transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Looking up the target event failed.
    #[error("failed to look up event {event_id}")]
    LookupEvent {
        /// Identifier of the event being looked up.
        event_id: u64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// The target event does not exist in the catalogue.
    #[error("event {event_id} does not exist")]
    UnknownEvent {
        /// Identifier that matched no event row.
        event_id: u64,
    },
    /// Writing the interaction row failed.
    #[error("failed to persist interaction row")]
    PersistRow {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Updating the event's popularity failed.
    #[error("failed to update popularity for event {event_id}")]
    UpdatePopularity {
        /// Identifier of the event being updated.
        event_id: u64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit interaction transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Append an interaction and boost the target event's popularity.
///
/// Views add one point and registrations five. A missing popularity value is
/// treated as zero before the boost. The row insert and the popularity
/// update share one transaction, so the log and the score never drift apart.
/// Returns the event's popularity after the boost.
///
/// # Errors
/// Returns [`RecordInteractionError::UnknownEvent`] when the event id matches
/// no catalogue row, and other variants when SQLite refuses the write.
pub fn record_interaction(
    path: &Utf8Path,
    interaction: &Interaction,
) -> Result<i32, RecordInteractionError> {
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| RecordInteractionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let event_id = i64::try_from(interaction.event_id).map_err(|_| {
        RecordInteractionError::IdOutOfRange {
            id: interaction.event_id,
        }
    })?;
    let user_id = i64::try_from(interaction.user_id).map_err(|_| {
        RecordInteractionError::IdOutOfRange {
            id: interaction.user_id,
        }
    })?;

    let transaction = connection
        .transaction()
        .map_err(|source| RecordInteractionError::BeginTransaction { source })?;

    let stored: Option<Option<i32>> = transaction
        .query_row(
            "SELECT popularity_score FROM events WHERE id = ?1",
            [event_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| RecordInteractionError::LookupEvent {
            event_id: interaction.event_id,
            source,
        })?;
    let Some(popularity) = stored else {
        return Err(RecordInteractionError::UnknownEvent {
            event_id: interaction.event_id,
        });
    };

    transaction
        .execute(
            "INSERT INTO interactions (user_id, event_id, kind) VALUES (?1, ?2, ?3)",
            (user_id, event_id, interaction.kind.as_str()),
        )
        .map_err(|source| RecordInteractionError::PersistRow { source })?;

    let updated = popularity
        .unwrap_or(0)
        .saturating_add(interaction.kind.popularity_boost());
    transaction
        .execute(
            "UPDATE events SET popularity_score = ?1 WHERE id = ?2",
            (updated, event_id),
        )
        .map_err(|source| RecordInteractionError::UpdatePopularity {
            event_id: interaction.event_id,
            source,
        })?;

    transaction
        .commit()
        .map_err(|source| RecordInteractionError::Commit { source })?;
    log::debug!(
        "recorded {} for event {}; popularity now {updated}",
        interaction.kind,
        interaction.event_id,
    );
    Ok(updated)
}
