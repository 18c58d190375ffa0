//! Property-based tests for the relevance scorer.
#![expect(clippy::expect_used, reason = "tests should fail fast when setup breaks")]
#![expect(clippy::float_arithmetic, reason = "property checks compare raw scores")]

use chrono::{Days, NaiveDate};
use eventide_core::test_support::MemoryStore;
use eventide_core::{Event, EventCategory, EventMode, Scorer, User};
use eventide_scorer::RelevanceEngine;
use proptest::prelude::*;

const TAG_POOL: [&str; 6] = ["java", "spring", "cloud", "ai", "data", "devops"];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date")
}

fn engine() -> RelevanceEngine<MemoryStore, MemoryStore> {
    RelevanceEngine::new(MemoryStore::default(), MemoryStore::default())
}

prop_compose! {
    fn arb_event()(
        popularity in 0..=100_i32,
        coding in 0..=100_i32,
        communication in 0..=100_i32,
        tag_mask in proptest::collection::vec(any::<bool>(), TAG_POOL.len()),
        days_ahead in proptest::option::of(0_u64..=60),
        online in any::<bool>(),
    ) -> Event {
        let tags = TAG_POOL
            .iter()
            .zip(&tag_mask)
            .filter_map(|(tag, keep)| keep.then_some(*tag));
        let mode = if online { EventMode::Online } else { EventMode::Offline };
        let mut event = Event::new(1, "Generated", EventCategory::Meetup, mode)
            .with_tags(tags)
            .with_popularity(popularity)
            .with_impact_scores(coding, communication);
        if let Some(days) = days_ahead {
            let date = today().checked_add_days(Days::new(days)).expect("valid date");
            event = event.with_date(date);
        }
        event
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn cold_start_scores_stay_within_one_unit_of_popularity(event in arb_event()) {
        let user = User::new(1, "new@example.com");
        let result = engine().evaluate(&user, &event, today());
        let floor = f64::from(event.popularity_score);
        prop_assert!(result.final_score >= floor);
        prop_assert!(result.final_score <= floor + 1.0);
        prop_assert!(!result.explanation.is_empty());
    }

    #[test]
    fn warm_scores_are_finite_and_always_explained(
        event in arb_event(),
        coding in 0.0_f64..=1.0,
        communication in 0.0_f64..=1.0,
    ) {
        let user = User::new(1, "dev@example.com")
            .with_interests(["java"])
            .with_coding_preference(coding)
            .with_communication_preference(communication);
        let result = engine().evaluate(&user, &event, today());
        prop_assert!(result.final_score.is_finite());
        prop_assert!(!result.explanation.is_empty());
    }

    #[test]
    fn a_matching_interest_raises_the_score_by_its_weight(event in arb_event()) {
        let matched = User::new(1, "a@example.com").with_interests(["java"]);
        let unmatched = User::new(2, "b@example.com").with_interests(["knitting"]);
        let scorer = engine();
        let with_match = scorer.evaluate(&matched, &event, today()).final_score;
        let without = scorer.evaluate(&unmatched, &event, today()).final_score;
        let expected = if event.tags.contains("java") { 25.0 } else { 0.0 };
        prop_assert!((with_match - without - expected).abs() < 1e-6);
    }

    #[test]
    fn a_keener_coding_preference_never_lowers_the_score(
        event in arb_event(),
        first in 0.0_f64..=1.0,
        second in 0.0_f64..=1.0,
    ) {
        let (low, high) = if first <= second { (first, second) } else { (second, first) };
        let scorer = engine();
        let base = User::new(1, "dev@example.com").with_interests(["java"]);
        let low_score = scorer
            .evaluate(&base.clone().with_coding_preference(low), &event, today())
            .final_score;
        let high_score = scorer
            .evaluate(&base.with_coding_preference(high), &event, today())
            .final_score;
        prop_assert!(high_score >= low_score - 1e-9);
    }

    #[test]
    fn scoring_ignores_tag_case_and_padding(event in arb_event()) {
        let restyled_tags: Vec<String> = event
            .tags
            .iter()
            .map(|tag| format!("  {} ", tag.to_uppercase()))
            .collect();
        let restyled = event.clone().with_tags(restyled_tags);
        let user = User::new(1, "dev@example.com").with_interests(["Java "]);
        let scorer = engine();
        let original = scorer.evaluate(&user, &event, today());
        let reworded = scorer.evaluate(&user, &restyled, today());
        prop_assert_eq!(original, reworded);
    }

    #[test]
    fn evaluate_is_deterministic(event in arb_event(), coding in 0.0_f64..=1.0) {
        let user = User::new(1, "dev@example.com")
            .with_interests(["cloud"])
            .with_coding_preference(coding);
        let scorer = engine();
        let first = scorer.evaluate(&user, &event, today());
        let second = scorer.evaluate(&user, &event, today());
        prop_assert_eq!(first, second);
    }
}
