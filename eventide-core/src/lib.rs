//! Core domain model for the Eventide recommendation engine.
//!
//! This crate defines the catalogue types ([`Event`], [`User`],
//! [`Interaction`]), the scoring and ranking contracts ([`Scorer`],
//! [`Recommender`]), and the store traits the engine reads through. The
//! weighted relevance scorer and the ranker live in their own crates and
//! depend only on what is defined here.
//!
//! Two conventions hold throughout:
//!
//! - Free-text tags are compared in normalised form only; see
//!   [`tags::normalise`].
//! - Absent catalogue values surface as domain defaults (empty collections,
//!   zero scores, neutral preferences), never as errors.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod event;
pub mod interaction;
pub mod recommend;
pub mod scorer;
pub mod store;
pub mod tags;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod user;

pub use event::{Event, EventCategory, EventMode};
pub use interaction::{Interaction, InteractionKind};
pub use recommend::{Diagnostics, RankRequest, RankResponse, RankedEvent, Recommender};
pub use scorer::{Scorer, ScoringResult};
pub use store::{EventStore, InteractionStore, UserStore};
#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub use store::{SqliteEventStore, SqliteEventStoreError};
pub use user::{PreferenceWeight, User};
