//! Weighted relevance scoring for the Eventide recommendation engine.
//!
//! [`RelevanceEngine`] implements the [`eventide_core::Scorer`] contract by
//! blending a user's declared interests, interaction history, learning
//! preferences, and an event's own popularity into one score with a
//! human-readable explanation. Users with no usable signal fall back to a
//! popularity ranking so a recommendation list never comes back empty
//! merely because a profile is new.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod types;

pub use engine::{RelevanceEngine, is_cold_start};
pub use types::{POPULAR_EXPLANATION_THRESHOLD, ScoreWeights};
