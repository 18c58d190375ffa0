//! End-to-end tests driving the seed, rank, and log commands together.

use eventide_core::InteractionKind;
use eventide_data::RecordInteractionError;
use rstest::rstest;
use serde_json::Value;

use super::helpers::{self, Workspace};
use super::*;
use crate::rank::{self, RankArgs};
use crate::record::{self, LogArgs};
use crate::seed::{self, SeedArgs};

/// Seeds the workspace database with the default mock catalogue.
fn seed_default(workspace: &Workspace) {
    let args = SeedArgs {
        db: Some(workspace.db.clone()),
        ..SeedArgs::default()
    };
    let mut sink = Vec::new();
    seed::run_seed_with(args, helpers::fixed_today(), &mut sink).expect("seed the catalogue");
}

/// Ranks the workspace catalogue for `email`, returning the parsed JSON.
fn rank_as_json(workspace: &Workspace, email: &str) -> Value {
    let args = RankArgs {
        db: Some(workspace.db.clone()),
        email: Some(email.to_owned()),
        date: Some(helpers::fixed_today()),
    };
    let mut output = Vec::new();
    rank::run_rank_with(args, &mut output).expect("rank the catalogue");
    serde_json::from_slice(&output).expect("the output is valid JSON")
}

#[rstest]
fn seeding_reports_a_summary() {
    let workspace = Workspace::new();
    let args = SeedArgs {
        db: Some(workspace.db.clone()),
        ..SeedArgs::default()
    };
    let mut output = Vec::new();
    seed::run_seed_with(args, helpers::fixed_today(), &mut output).expect("seed the catalogue");
    let summary = String::from_utf8(output).expect("utf-8 summary");
    assert_eq!(
        summary,
        format!("seeded 20 events and 3 users into {}\n", workspace.db)
    );
}

#[rstest]
fn seeding_then_ranking_returns_the_top_five() {
    let workspace = Workspace::new();
    seed_default(&workspace);
    let response = rank_as_json(&workspace, "alice@example.com");

    let items = response
        .pointer("/items")
        .and_then(Value::as_array)
        .expect("items array");
    assert_eq!(items.len(), 5);
    assert_eq!(
        response
            .pointer("/diagnostics/candidates_evaluated")
            .and_then(Value::as_u64),
        Some(20)
    );
    let scores: Vec<f64> = items
        .iter()
        .filter_map(|item| item.pointer("/final_score").and_then(Value::as_f64))
        .collect();
    assert_eq!(scores.len(), 5);
    assert!(
        scores
            .windows(2)
            .all(|pair| pair.first().zip(pair.get(1)).is_some_and(|(a, b)| a >= b))
    );
}

#[rstest]
fn unknown_emails_rank_to_an_empty_list() {
    let workspace = Workspace::new();
    seed_default(&workspace);
    let response = rank_as_json(&workspace, "stranger@example.com");

    let items = response
        .pointer("/items")
        .and_then(Value::as_array)
        .expect("items array");
    assert!(items.is_empty());
    assert_eq!(
        response
            .pointer("/diagnostics/candidates_evaluated")
            .and_then(Value::as_u64),
        Some(0)
    );
}

#[rstest]
fn logging_a_view_boosts_popularity_by_one() {
    let workspace = Workspace::new();
    let (events, users) = helpers::tiny_catalogue();
    eventide_data::persist_catalogue(&workspace.db, &events, &users)
        .expect("persist the catalogue");

    let args = LogArgs {
        db: Some(workspace.db.clone()),
        email: Some("alice@example.com".to_owned()),
        event: Some(1),
        kind: Some(InteractionKind::View),
    };
    let mut output = Vec::new();
    record::run_log_with(args, &mut output).expect("log the view");

    let confirmation = String::from_utf8(output).expect("utf-8 confirmation");
    assert_eq!(
        confirmation,
        "logged view by alice@example.com for event 1; popularity now 41\n"
    );
    assert_eq!(helpers::interaction_count(&workspace.db), 1);
}

#[rstest]
fn logging_for_an_unknown_user_errors() {
    let workspace = Workspace::new();
    let (events, users) = helpers::tiny_catalogue();
    eventide_data::persist_catalogue(&workspace.db, &events, &users)
        .expect("persist the catalogue");

    let args = LogArgs {
        db: Some(workspace.db.clone()),
        email: Some("stranger@example.com".to_owned()),
        event: Some(1),
        kind: Some(InteractionKind::Register),
    };
    let mut output = Vec::new();
    let err = record::run_log_with(args, &mut output).expect_err("the user is unknown");
    match err {
        CliError::UnknownUser { email } => assert_eq!(email, "stranger@example.com"),
        other => panic!("expected UnknownUser, found {other:?}"),
    }
    assert_eq!(helpers::interaction_count(&workspace.db), 0);
}

#[rstest]
fn logging_against_an_unknown_event_reports_it() {
    let workspace = Workspace::new();
    let (events, users) = helpers::tiny_catalogue();
    eventide_data::persist_catalogue(&workspace.db, &events, &users)
        .expect("persist the catalogue");

    let args = LogArgs {
        db: Some(workspace.db.clone()),
        email: Some("alice@example.com".to_owned()),
        event: Some(99),
        kind: Some(InteractionKind::View),
    };
    let mut output = Vec::new();
    let err = record::run_log_with(args, &mut output).expect_err("the event is unknown");
    assert!(matches!(
        err,
        CliError::RecordInteraction {
            source: RecordInteractionError::UnknownEvent { event_id: 99 },
            ..
        }
    ));
    assert_eq!(helpers::interaction_count(&workspace.db), 0);
}
