//! Facade crate for the Eventide recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the relevance
//! scorer, the ranker, and the SQLite-backed store behind feature flags.
//!
//! # Examples
//!
//! Rank a one-event catalogue for a user interested in one of its tags:
//!
//! ```
//! use chrono::NaiveDate;
//! use eventide_engine::{
//!     Event, EventCategory, EventMode, EventRanker, EventStore, Interaction, InteractionStore,
//!     RankRequest, Recommender, RelevanceEngine, User,
//! };
//!
//! #[derive(Clone)]
//! struct SingleEvent(Event);
//!
//! impl EventStore for SingleEvent {
//!     fn events_on_or_after(
//!         &self,
//!         date: NaiveDate,
//!     ) -> Box<dyn Iterator<Item = Event> + Send + '_> {
//!         let event = self.0.clone();
//!         Box::new(event.date.is_some_and(|d| d >= date).then_some(event).into_iter())
//!     }
//!
//!     fn find_event(&self, id: u64) -> Option<Event> {
//!         (self.0.id == id).then(|| self.0.clone())
//!     }
//! }
//!
//! struct NoInteractions;
//!
//! impl InteractionStore for NoInteractions {
//!     fn interactions_for(
//!         &self,
//!         _user_id: u64,
//!     ) -> Box<dyn Iterator<Item = Interaction> + Send + '_> {
//!         Box::new(std::iter::empty())
//!     }
//! }
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date");
//! let event = Event::new(7, "Rust Workshop", EventCategory::Workshop, EventMode::Online)
//!     .with_tags(["rust"])
//!     .with_date(today);
//! let user = User::new(1, "ada@example.com").with_interests(["rust"]);
//!
//! let engine = RelevanceEngine::new(NoInteractions, SingleEvent(event.clone()));
//! let ranker = EventRanker::new(SingleEvent(event), engine);
//! let response = ranker.rank(&RankRequest { user: Some(user), today });
//!
//! assert_eq!(response.items.len(), 1);
//! assert_eq!(
//!     response.items[0].explanation,
//!     "Matched your interest in rust; Available online",
//! );
//! ```

#![forbid(unsafe_code)]

pub use eventide_core::{
    Diagnostics, Event, EventCategory, EventMode, EventStore, Interaction, InteractionKind,
    InteractionStore, PreferenceWeight, RankRequest, RankResponse, RankedEvent, Recommender,
    Scorer, ScoringResult, User, UserStore,
};

#[cfg(feature = "store-sqlite")]
pub use eventide_core::{SqliteEventStore, SqliteEventStoreError};

#[cfg(feature = "scorer")]
pub use eventide_scorer::{RelevanceEngine, ScoreWeights};

#[cfg(feature = "ranker")]
pub use eventide_ranker::{EventRanker, RankerConfig};
