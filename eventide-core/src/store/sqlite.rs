//! SQLite-backed catalogue store.
//!
//! [`SqliteEventStore::open`] opens the database read-only and loads the
//! whole catalogue eagerly, so lookups never touch the connection again and
//! a store can be shared freely once constructed. Writers live elsewhere;
//! a store sees the catalogue as it was at open time.

use std::collections::BTreeSet;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags, Row};
use thiserror::Error;

use crate::event::{Event, EventCategory, EventMode};
use crate::interaction::{Interaction, InteractionKind};
use crate::store::{EventStore, InteractionStore, UserStore};
use crate::user::{PreferenceWeight, User};

const SELECT_EVENTS: &str = "SELECT id, title, description, category, tags, location, mode, date, \
     coding_impact_score, communication_impact_score, popularity_score \
     FROM events ORDER BY id";
const SELECT_USERS: &str = "SELECT id, email, interests, skills, location, coding_preference, \
     communication_preference FROM users ORDER BY id";
const SELECT_INTERACTIONS: &str =
    "SELECT id, user_id, event_id, kind FROM interactions ORDER BY id";

/// Errors raised while opening and loading a catalogue database.
#[derive(Debug, Error)]
pub enum SqliteEventStoreError {
    /// The database file could not be opened read-only.
    #[error("failed to open catalogue database at {path}: {source}")]
    OpenDatabase {
        /// Path of the database that failed to open.
        path: Utf8PathBuf,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },
    /// A catalogue query failed.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
    /// A row identifier was negative and cannot name a catalogue record.
    #[error("{table} row id {id} does not fit in u64")]
    IdOutOfRange {
        /// Table the offending row came from.
        table: &'static str,
        /// The stored identifier.
        id: i64,
    },
    /// An event row carried an unrecognised category.
    #[error("event {id} has an unrecognised category {value:?}")]
    InvalidCategory {
        /// Identifier of the offending event.
        id: u64,
        /// The stored category text.
        value: String,
    },
    /// An event row carried an unrecognised delivery mode.
    #[error("event {id} has an unrecognised mode {value:?}")]
    InvalidMode {
        /// Identifier of the offending event.
        id: u64,
        /// The stored mode text.
        value: String,
    },
    /// An event row carried a date that is not `YYYY-MM-DD`.
    #[error("event {id} has an invalid date")]
    InvalidDate {
        /// Identifier of the offending event.
        id: u64,
        /// Underlying parse error.
        #[source]
        source: chrono::ParseError,
    },
    /// An event row carried tags that are not a JSON string array.
    #[error("event {id} has invalid tags")]
    InvalidTags {
        /// Identifier of the offending event.
        id: u64,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A user row carried interests that are not a JSON string array.
    #[error("user {id} has invalid interests")]
    InvalidInterests {
        /// Identifier of the offending user.
        id: u64,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A user row carried skills that are not a JSON string array.
    #[error("user {id} has invalid skills")]
    InvalidSkills {
        /// Identifier of the offending user.
        id: u64,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// An interaction row carried an unrecognised kind.
    #[error("interaction row {row} has an unrecognised kind {value:?}")]
    InvalidKind {
        /// Row identifier of the offending interaction.
        row: i64,
        /// The stored kind text.
        value: String,
    },
}

/// Catalogue store backed by a SQLite database.
///
/// The catalogue is loaded eagerly at open time and the connection released,
/// so the store is a plain in-memory snapshot afterwards.
pub struct SqliteEventStore {
    events: Vec<Event>,
    users: Vec<User>,
    interactions: Vec<Interaction>,
}

impl SqliteEventStore {
    /// Opens `path` read-only and loads the full catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened, a query fails, or a
    /// row holds values the domain types reject (unknown category or mode,
    /// malformed tag JSON, malformed dates, negative identifiers).
    pub fn open(path: &Utf8Path) -> Result<Self, SqliteEventStoreError> {
        let conn = Connection::open_with_flags(
            path.as_std_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .map_err(|source| SqliteEventStoreError::OpenDatabase {
            path: path.to_owned(),
            source,
        })?;
        let events = load_events(&conn)?;
        let users = load_users(&conn)?;
        let interactions = load_interactions(&conn)?;
        log::debug!(
            "loaded catalogue from {path}: {} events, {} users, {} interactions",
            events.len(),
            users.len(),
            interactions.len(),
        );
        Ok(Self {
            events,
            users,
            interactions,
        })
    }
}

impl fmt::Debug for SqliteEventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteEventStore")
            .field("events", &self.events.len())
            .field("users", &self.users.len())
            .field("interactions", &self.interactions.len())
            .finish()
    }
}

impl EventStore for SqliteEventStore {
    fn events_on_or_after(&self, date: NaiveDate) -> Box<dyn Iterator<Item = Event> + Send + '_> {
        Box::new(
            self.events
                .iter()
                .filter(move |event| event.date.is_some_and(|scheduled| scheduled >= date))
                .cloned(),
        )
    }

    fn find_event(&self, id: u64) -> Option<Event> {
        // Rows are loaded ordered by id, so binary search holds.
        self.events
            .binary_search_by_key(&id, |event| event.id)
            .ok()
            .and_then(|index| self.events.get(index).cloned())
    }
}

impl InteractionStore for SqliteEventStore {
    fn interactions_for(&self, user_id: u64) -> Box<dyn Iterator<Item = Interaction> + Send + '_> {
        Box::new(
            self.interactions
                .iter()
                .filter(move |interaction| interaction.user_id == user_id)
                .copied(),
        )
    }
}

impl UserStore for SqliteEventStore {
    fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.iter().find(|user| user.email == email).cloned()
    }
}

fn parse_id(table: &'static str, raw: i64) -> Result<u64, SqliteEventStoreError> {
    u64::try_from(raw).map_err(|_| SqliteEventStoreError::IdOutOfRange { table, id: raw })
}

fn parse_tag_list(
    json: Option<&str>,
    on_error: impl Fn(serde_json::Error) -> SqliteEventStoreError,
) -> Result<BTreeSet<String>, SqliteEventStoreError> {
    json.map(|text| serde_json::from_str::<BTreeSet<String>>(text).map_err(&on_error))
        .transpose()
        .map(Option::unwrap_or_default)
}

fn load_events(conn: &Connection) -> Result<Vec<Event>, SqliteEventStoreError> {
    let mut statement = conn.prepare(SELECT_EVENTS)?;
    let mut rows = statement.query([])?;
    let mut events = Vec::new();
    while let Some(row) = rows.next()? {
        events.push(event_from_row(row)?);
    }
    Ok(events)
}

fn event_from_row(row: &Row<'_>) -> Result<Event, SqliteEventStoreError> {
    let raw_id: i64 = row.get("id")?;
    let id = parse_id("events", raw_id)?;
    let title: String = row.get("title")?;
    let description: Option<String> = row.get("description")?;
    let category_text: String = row.get("category")?;
    let category = category_text
        .parse::<EventCategory>()
        .map_err(|_| SqliteEventStoreError::InvalidCategory {
            id,
            value: category_text,
        })?;
    let tags_json: Option<String> = row.get("tags")?;
    let tags = parse_tag_list(tags_json.as_deref(), |source| {
        SqliteEventStoreError::InvalidTags { id, source }
    })?;
    let location: Option<String> = row.get("location")?;
    let mode_text: String = row.get("mode")?;
    let mode = mode_text
        .parse::<EventMode>()
        .map_err(|_| SqliteEventStoreError::InvalidMode {
            id,
            value: mode_text,
        })?;
    let date_text: Option<String> = row.get("date")?;
    let date = date_text
        .as_deref()
        .map(|text| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|source| SqliteEventStoreError::InvalidDate { id, source })
        })
        .transpose()?;
    let coding: Option<i32> = row.get("coding_impact_score")?;
    let communication: Option<i32> = row.get("communication_impact_score")?;
    let popularity: Option<i32> = row.get("popularity_score")?;
    Ok(Event {
        id,
        title,
        description: description.unwrap_or_default(),
        category,
        tags,
        location,
        mode,
        date,
        coding_impact_score: coding.unwrap_or(0),
        communication_impact_score: communication.unwrap_or(0),
        popularity_score: popularity.unwrap_or(0),
    })
}

fn load_users(conn: &Connection) -> Result<Vec<User>, SqliteEventStoreError> {
    let mut statement = conn.prepare(SELECT_USERS)?;
    let mut rows = statement.query([])?;
    let mut users = Vec::new();
    while let Some(row) = rows.next()? {
        users.push(user_from_row(row)?);
    }
    Ok(users)
}

fn user_from_row(row: &Row<'_>) -> Result<User, SqliteEventStoreError> {
    let raw_id: i64 = row.get("id")?;
    let id = parse_id("users", raw_id)?;
    let email: String = row.get("email")?;
    let interests_json: Option<String> = row.get("interests")?;
    let interests = parse_tag_list(interests_json.as_deref(), |source| {
        SqliteEventStoreError::InvalidInterests { id, source }
    })?;
    let skills_json: Option<String> = row.get("skills")?;
    let skills = parse_tag_list(skills_json.as_deref(), |source| {
        SqliteEventStoreError::InvalidSkills { id, source }
    })?;
    let location: Option<String> = row.get("location")?;
    let coding: Option<f64> = row.get("coding_preference")?;
    let communication: Option<f64> = row.get("communication_preference")?;
    Ok(User {
        id,
        email,
        interests,
        skills,
        location,
        coding_preference: coding.map_or(PreferenceWeight::NEUTRAL, PreferenceWeight::new),
        communication_preference: communication
            .map_or(PreferenceWeight::NEUTRAL, PreferenceWeight::new),
    })
}

fn load_interactions(conn: &Connection) -> Result<Vec<Interaction>, SqliteEventStoreError> {
    let mut statement = conn.prepare(SELECT_INTERACTIONS)?;
    let mut rows = statement.query([])?;
    let mut interactions = Vec::new();
    while let Some(row) = rows.next()? {
        interactions.push(interaction_from_row(row)?);
    }
    Ok(interactions)
}

fn interaction_from_row(row: &Row<'_>) -> Result<Interaction, SqliteEventStoreError> {
    let row_id: i64 = row.get("id")?;
    let raw_user: i64 = row.get("user_id")?;
    let raw_event: i64 = row.get("event_id")?;
    let kind_text: String = row.get("kind")?;
    let kind = kind_text
        .parse::<InteractionKind>()
        .map_err(|_| SqliteEventStoreError::InvalidKind {
            row: row_id,
            value: kind_text,
        })?;
    Ok(Interaction {
        user_id: parse_id("interactions", raw_user)?,
        event_id: parse_id("interactions", raw_event)?,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use camino::{Utf8Path, Utf8PathBuf};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::{SqliteEventStore, SqliteEventStoreError};
    use crate::store::{EventStore, InteractionStore, UserStore};
    use crate::user::PreferenceWeight;

    const SCHEMA: &str = "
        CREATE TABLE events (
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
        );
        CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            interests TEXT,
            skills TEXT,
            location TEXT,
            coding_preference REAL,
            communication_preference REAL
        );
        CREATE TABLE interactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            event_id INTEGER NOT NULL,
            kind TEXT NOT NULL
        );
    ";

    struct Workspace {
        _dir: TempDir,
        db: Utf8PathBuf,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = TempDir::new().expect("create temp dir");
        let db = Utf8PathBuf::from_path_buf(dir.path().join("catalogue.db"))
            .expect("temp path is valid UTF-8");
        Workspace { _dir: dir, db }
    }

    fn seed(path: &Utf8Path, rows: &str) {
        let conn = Connection::open(path.as_std_path()).expect("open database for seeding");
        conn.execute_batch(SCHEMA).expect("create schema");
        conn.execute_batch(rows).expect("insert fixture rows");
    }

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 10).expect("valid date")
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare weights by absolute difference")]
    fn open_loads_catalogue_and_applies_defaults(workspace: Workspace) {
        seed(
            &workspace.db,
            r#"
            INSERT INTO events VALUES
                (1, 'Spring Boot Meetup', NULL, 'meetup', '["java","spring"]',
                 'Mumbai', 'offline', '2026-07-12', 40, 20, NULL),
                (2, 'Cloud Native Summit', 'Two days of talks.', 'conference', NULL,
                 NULL, 'online', NULL, 10, 5, 88);
            INSERT INTO users VALUES
                (1, 'asha@example.com', '["Java","AI"]', '[]', 'Mumbai', 0.9, NULL);
            INSERT INTO interactions (user_id, event_id, kind) VALUES (1, 2, 'view');
            "#,
        );
        let store = SqliteEventStore::open(&workspace.db).expect("open catalogue");

        let first = store.find_event(1).expect("event 1 is loaded");
        assert_eq!(first.description, "");
        assert_eq!(first.popularity_score, 0);
        assert!(first.tags.contains("spring"));

        let second = store.find_event(2).expect("event 2 is loaded");
        assert!(second.tags.is_empty());
        assert!(second.date.is_none());
        assert_eq!(second.popularity_score, 88);

        let user = store.find_by_email("asha@example.com").expect("user is loaded");
        assert!(user.interests.contains("Java"));
        assert!((user.coding_preference.value() - 0.9).abs() < f64::EPSILON);
        assert_eq!(user.communication_preference, PreferenceWeight::NEUTRAL);

        assert_eq!(store.interactions_for(1).count(), 1);
        assert_eq!(store.interactions_for(2).count(), 0);
    }

    #[rstest]
    fn upcoming_cutoff_is_inclusive_and_skips_undated_rows(workspace: Workspace) {
        seed(
            &workspace.db,
            r#"
            INSERT INTO events VALUES
                (1, 'Today Workshop', NULL, 'workshop', '[]', NULL, 'online', '2026-07-10', 0, 0, 0),
                (2, 'Past Meetup', NULL, 'meetup', '[]', NULL, 'online', '2026-07-09', 0, 0, 0),
                (3, 'Undated Webinar', NULL, 'webinar', '[]', NULL, 'online', NULL, 0, 0, 0);
            "#,
        );
        let store = SqliteEventStore::open(&workspace.db).expect("open catalogue");
        let upcoming: Vec<u64> = store.events_on_or_after(cutoff()).map(|event| event.id).collect();
        assert_eq!(upcoming, [1]);
    }

    #[rstest]
    fn find_event_misses_return_none(workspace: Workspace) {
        seed(
            &workspace.db,
            "INSERT INTO events VALUES
                (7, 'UX Research Lab', NULL, 'workshop', '[]', NULL, 'offline', NULL, 0, 0, 0);",
        );
        let store = SqliteEventStore::open(&workspace.db).expect("open catalogue");
        assert!(store.find_event(7).is_some());
        assert!(store.find_event(8).is_none());
        assert!(store.find_by_email("nobody@example.com").is_none());
    }

    #[rstest]
    fn open_rejects_missing_file(workspace: Workspace) {
        let missing = workspace.db.join("nope.db");
        let error = SqliteEventStore::open(&missing).expect_err("open must fail");
        assert!(matches!(
            error,
            SqliteEventStoreError::OpenDatabase { .. }
        ));
    }

    #[rstest]
    #[case::category(
        "INSERT INTO events VALUES
            (1, 'Mystery', NULL, 'seance', '[]', NULL, 'online', NULL, 0, 0, 0);"
    )]
    #[case::mode(
        "INSERT INTO events VALUES
            (1, 'Mystery', NULL, 'meetup', '[]', NULL, 'holographic', NULL, 0, 0, 0);"
    )]
    #[case::tags(
        "INSERT INTO events VALUES
            (1, 'Mystery', NULL, 'meetup', 'java,spring', NULL, 'online', NULL, 0, 0, 0);"
    )]
    #[case::date(
        "INSERT INTO events VALUES
            (1, 'Mystery', NULL, 'meetup', '[]', NULL, 'online', '12/07/2026', 0, 0, 0);"
    )]
    fn open_rejects_malformed_event_rows(workspace: Workspace, #[case] rows: &str) {
        seed(&workspace.db, rows);
        assert!(SqliteEventStore::open(&workspace.db).is_err());
    }

    #[rstest]
    fn open_rejects_unknown_interaction_kind(workspace: Workspace) {
        seed(
            &workspace.db,
            "INSERT INTO interactions (user_id, event_id, kind) VALUES (1, 1, 'bookmark');",
        );
        let error = SqliteEventStore::open(&workspace.db).expect_err("open must fail");
        assert!(matches!(error, SqliteEventStoreError::InvalidKind { .. }));
    }
}
