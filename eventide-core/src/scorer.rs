//! Scoring seam between the catalogue and the ranker.
//!
//! Scoring strategies implement [`Scorer`]; the ranker only ever sees this
//! trait, so the weighted relevance engine, stub scorers in tests, and any
//! future model-backed implementation are interchangeable.

use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::user::User;

/// Outcome of scoring one event for one user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoringResult {
    /// The weighted relevance score; higher ranks earlier.
    pub final_score: f64,
    /// Human-readable summary of why the event scored as it did.
    pub explanation: String,
}

impl ScoringResult {
    /// Creates a scoring result.
    #[must_use]
    pub fn new(final_score: f64, explanation: impl Into<String>) -> Self {
        Self {
            final_score,
            explanation: explanation.into(),
        }
    }
}

/// Scores an event's relevance to a user.
///
/// Implementations must be deterministic: the same user, event, and date
/// always yield the same result. `today` anchors any date arithmetic so
/// calls are reproducible in tests.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eventide_core::{Event, EventCategory, EventMode, Scorer, ScoringResult, User};
///
/// struct PopularityOnly;
///
/// impl Scorer for PopularityOnly {
///     fn evaluate(&self, _user: &User, event: &Event, _today: NaiveDate) -> ScoringResult {
///         ScoringResult::new(f64::from(event.popularity_score), "Popular event")
///     }
/// }
///
/// let event = Event::new(1, "Cloud Native Summit", EventCategory::Conference, EventMode::Online)
///     .with_popularity(64);
/// let user = User::new(1, "sam@example.com");
/// let today = NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date");
/// let result = PopularityOnly.evaluate(&user, &event, today);
/// assert!((result.final_score - 64.0).abs() < f64::EPSILON);
/// ```
pub trait Scorer: Send + Sync {
    /// Scores `event` for `user`, anchoring date arithmetic at `today`.
    fn evaluate(&self, user: &User, event: &Event, today: NaiveDate) -> ScoringResult;
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{Scorer, ScoringResult};
    use crate::event::{Event, EventCategory, EventMode};
    use crate::user::User;

    struct Halved;

    impl Scorer for Halved {
        #[expect(clippy::float_arithmetic, reason = "stub scorer halves popularity")]
        fn evaluate(&self, _user: &User, event: &Event, _today: NaiveDate) -> ScoringResult {
            ScoringResult::new(f64::from(event.popularity_score) / 2.0, "halved")
        }
    }

    fn fixture_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 2).expect("valid date")
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare scores by absolute difference")]
    fn trait_objects_are_usable() {
        let scorer: &dyn Scorer = &Halved;
        let event = Event::new(5, "Startup Pitch Night", EventCategory::Meetup, EventMode::Offline)
            .with_popularity(50);
        let result = scorer.evaluate(&User::new(1, "t@example.com"), &event, fixture_date());
        assert!((result.final_score - 25.0).abs() < f64::EPSILON);
        assert_eq!(result.explanation, "halved");
    }
}
