//! Round-trip coverage between the catalogue writer and the read-only store.
#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use eventide_core::{
    EventStore, Interaction, InteractionKind, InteractionStore, SqliteEventStore, UserStore,
};
use eventide_data::{mock, persist_catalogue, record_interaction};
use rstest::rstest;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date")
}

fn seeded_db(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("catalogue.db")).expect("utf-8 path")
}

#[rstest]
fn seeded_catalogues_read_back_identically() {
    let dir = TempDir::new().expect("create temp dir");
    let db = seeded_db(&dir);
    let (events, users) = mock::catalogue(42, mock::EVENTS_PER_RUN, today());

    persist_catalogue(&db, &events, &users).expect("persist catalogue");
    let store = SqliteEventStore::open(&db).expect("open catalogue");

    let restored: Vec<_> = store.events_on_or_after(today()).collect();
    assert_eq!(restored, events, "every generated event is upcoming");

    let alice = store
        .find_by_email("alice@example.com")
        .expect("alice was seeded");
    assert_eq!(Some(&alice), users.first());
    assert!(store.find_by_email("nobody@example.com").is_none());
}

#[rstest]
fn recorded_interactions_surface_through_the_store() {
    let dir = TempDir::new().expect("create temp dir");
    let db = seeded_db(&dir);
    let (events, users) = mock::catalogue(42, 5, today());
    persist_catalogue(&db, &events, &users).expect("persist catalogue");
    let original = events.first().expect("five events").popularity_score;

    record_interaction(&db, &Interaction::new(1, 1, InteractionKind::View))
        .expect("record a view");
    record_interaction(&db, &Interaction::new(1, 1, InteractionKind::Register))
        .expect("record a registration");

    let store = SqliteEventStore::open(&db).expect("open catalogue");
    let kinds: Vec<InteractionKind> = store
        .interactions_for(1)
        .map(|interaction| interaction.kind)
        .collect();
    assert_eq!(kinds, vec![InteractionKind::View, InteractionKind::Register]);

    let boosted = store.find_event(1).expect("event 1 was seeded");
    assert_eq!(boosted.popularity_score, original + 6);
}
