//! Ranking of scored events into a bounded recommendation list.
//!
//! [`EventRanker`] implements [`eventide_core::Recommender`] by pairing an
//! event store with any [`eventide_core::Scorer`]. Candidates are limited to
//! events dated on or after the request's `today`, ordered by descending
//! score with ties broken on ascending event id, and truncated to
//! [`RankerConfig::max_results`].
//!
//! ```
//! use eventide_core::test_support::MemoryStore;
//! use eventide_core::{Event, EventCategory, EventMode, RankRequest, Recommender, User};
//! use eventide_ranker::EventRanker;
//! use eventide_scorer::RelevanceEngine;
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date");
//! let store = MemoryStore::default().with_event(
//!     Event::new(1, "Rust Meetup", EventCategory::Meetup, EventMode::Online)
//!         .with_tags(["rust"])
//!         .with_date(today),
//! );
//! let engine = RelevanceEngine::new(store.clone(), store.clone());
//! let ranker = EventRanker::new(store, engine);
//!
//! let response = ranker.rank(&RankRequest {
//!     user: Some(User::new(7, "dev@example.com").with_interests(["rust"])),
//!     today,
//! });
//! assert_eq!(response.items.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod ranker;

pub use ranker::{EventRanker, RankerConfig};
