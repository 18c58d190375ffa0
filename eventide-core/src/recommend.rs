//! Request and response types for the ranking contract.

use std::time::Duration;

use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::event::{EventCategory, EventMode};
use crate::user::User;

/// A request to rank upcoming events for a user.
///
/// `user` is `None` when the caller could not resolve one; ranking then
/// yields no items rather than failing, because an anonymous request is an
/// expected state and not an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankRequest {
    /// The user to rank for, if one was resolved.
    pub user: Option<User>,
    /// The date that anchors the upcoming-event cutoff and date boosts.
    pub today: NaiveDate,
}

/// One recommended event, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedEvent {
    /// Identifier of the recommended event.
    pub event_id: u64,
    /// Event title.
    pub title: String,
    /// Event category.
    pub category: EventCategory,
    /// Venue city, if the event has one.
    pub location: Option<String>,
    /// Whether attendees join remotely or in person.
    pub mode: EventMode,
    /// Scheduled date, if known.
    pub date: Option<NaiveDate>,
    /// The relevance score that placed the event at this position.
    pub final_score: f64,
    /// Why the event was recommended.
    pub explanation: String,
}

/// Measurements recorded while ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent producing the ranking.
    pub rank_time: Duration,
    /// Number of candidate events that were scored.
    pub candidates_evaluated: u64,
}

/// An ordered recommendation list plus ranking diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankResponse {
    /// Recommendations, best first.
    pub items: Vec<RankedEvent>,
    /// Measurements recorded while ranking.
    pub diagnostics: Diagnostics,
}

/// Produces ranked recommendations for a request.
///
/// Ranking is infallible: requests without a resolved user, an empty
/// catalogue, or a catalogue with no upcoming events all yield an empty
/// item list with diagnostics still populated.
pub trait Recommender: Send + Sync {
    /// Ranks upcoming events for the request's user.
    fn rank(&self, request: &RankRequest) -> RankResponse;
}
