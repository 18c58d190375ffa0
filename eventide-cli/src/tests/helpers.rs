//! Shared fixtures for CLI tests: temporary workspaces and tiny catalogues.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use eventide_core::{Event, EventCategory, EventMode, User};
use tempfile::TempDir;

/// A temporary directory holding a catalogue database path.
///
/// The directory lives as long as the workspace, so a database created at
/// [`Workspace::db`] survives for the duration of a test.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) db: Utf8PathBuf,
}

impl Workspace {
    /// Creates a fresh workspace; the database file does not exist yet.
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("create a temporary directory");
        let db = Utf8PathBuf::from_path_buf(dir.path().join("catalogue.db")).expect("utf-8 path");
        Self { _dir: dir, db }
    }
}

/// Fixed anchor date so seeded catalogues are fully reproducible.
pub(super) fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date")
}

/// One upcoming event with popularity forty plus one resolvable user.
pub(super) fn tiny_catalogue() -> (Vec<Event>, Vec<User>) {
    let event = Event::new(
        1,
        "Cloud Native Summit",
        EventCategory::Conference,
        EventMode::Online,
    )
    .with_tags(["cloud"])
    .with_date(fixed_today())
    .with_popularity(40);
    let user = User::new(1, "alice@example.com").with_interests(["cloud"]);
    (vec![event], vec![user])
}

/// Counts rows in the interactions table of the given database.
pub(super) fn interaction_count(db: &Utf8Path) -> i64 {
    let connection = rusqlite::Connection::open(db).expect("open the database");
    connection
        .query_row("SELECT COUNT(*) FROM interactions", [], |row| row.get(0))
        .expect("count interactions")
}
