//! Weighted relevance scoring over a user's profile and activity.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use eventide_core::store::{EventStore, InteractionStore};
use eventide_core::tags::normalise;
use eventide_core::{Event, EventMode, Scorer, ScoringResult, User};

use crate::types::{POPULAR_EXPLANATION_THRESHOLD, ScoreWeights};

const GENERIC_EXPLANATION: &str = "Recommended event";
const POPULAR_FALLBACK_EXPLANATION: &str = "Popular upcoming event";
const UPCOMING_FALLBACK_EXPLANATION: &str = "Upcoming soon";

/// Returns `true` when the user offers the scorer nothing to work with:
/// no usable interest, no usable skill, and no interaction history.
///
/// Interests and skills count only when an entry survives normalisation,
/// so profiles holding nothing but whitespace still cold-start.
#[must_use]
pub fn is_cold_start(user: &User, interacted_tags: &BTreeSet<String>) -> bool {
    has_no_signal(&user.interests) && has_no_signal(&user.skills) && interacted_tags.is_empty()
}

fn has_no_signal(tags: &BTreeSet<String>) -> bool {
    tags.iter().all(|tag| tag.trim().is_empty())
}

/// One contributing signal, rendered into the explanation string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reason {
    InterestMatch(String),
    PastActivity,
    SameLocation,
    OnlineAvailability,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InterestMatch(interest) => write!(f, "Matched your interest in {interest}"),
            Self::PastActivity => f.write_str("Based on your past activity"),
            Self::SameLocation => f.write_str("Popular in your location"),
            Self::OnlineAvailability => f.write_str("Available online"),
        }
    }
}

fn explanation_from(reasons: &[Reason]) -> String {
    if reasons.is_empty() {
        GENERIC_EXPLANATION.to_owned()
    } else {
        reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn shares_location(user: &User, event: &Event) -> bool {
    user.location
        .as_deref()
        .zip(event.location.as_deref())
        .is_some_and(|(user_city, event_city)| {
            user_city.to_lowercase() == event_city.to_lowercase()
        })
}

/// Decays from 1.0 for an event today towards zero as the date recedes.
/// Past dates and missing dates contribute nothing.
#[expect(clippy::float_arithmetic, reason = "date proximity decays as 1/(days+1)")]
fn date_boost(date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(scheduled) = date else {
        return 0.0;
    };
    let days_until = (scheduled - today).num_days();
    if days_until < 0 {
        return 0.0;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "day offsets are tiny relative to f64 precision"
    )]
    let horizon = days_until as f64;
    1.0 / (horizon + 1.0)
}

#[expect(clippy::float_arithmetic, reason = "fallback blends popularity with date proximity")]
fn fallback_score(event: &Event, today: NaiveDate) -> f64 {
    f64::from(event.popularity_score) + date_boost(event.date, today)
}

fn fallback_explanation(event: &Event) -> &'static str {
    if event.popularity_score >= POPULAR_EXPLANATION_THRESHOLD {
        POPULAR_FALLBACK_EXPLANATION
    } else if event.date.is_some() {
        UPCOMING_FALLBACK_EXPLANATION
    } else {
        GENERIC_EXPLANATION
    }
}

/// Scores events by weighted relevance to a user's interests, preferences,
/// and interaction history.
///
/// For users with any usable signal the score sums:
///
/// - an interest-match bonus when an event tag matches a declared interest;
/// - a personalisation boost when an event tag matches the tags of events
///   the user previously viewed or registered for;
/// - the event's impact scores, each scaled by its weight and the user's
///   preference for that dimension;
/// - the event's popularity, scaled by its weight;
/// - a location bonus when the user and event share a city, or failing
///   that an online bonus when the event is remote.
///
/// Users with no interests, no skills, and no history instead receive a
/// popularity fallback with a small boost for imminent dates.
///
/// Every contributing signal is echoed into the result's explanation, so a
/// recommendation can always say why it was made.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eventide_core::test_support::MemoryStore;
/// use eventide_core::{Event, EventCategory, EventMode, Scorer, User};
/// use eventide_scorer::RelevanceEngine;
///
/// let store = MemoryStore::default();
/// let engine = RelevanceEngine::new(store.clone(), store);
/// let user = User::new(1, "noa@example.com").with_interests(["ai"]);
/// let event = Event::new(2, "AI for Developers", EventCategory::Conference, EventMode::Offline)
///     .with_tags(["ai", "cloud"]);
/// let today = NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date");
///
/// let result = engine.evaluate(&user, &event, today);
/// assert_eq!(result.explanation, "Matched your interest in ai");
/// ```
#[derive(Debug, Clone)]
pub struct RelevanceEngine<I, E> {
    interactions: I,
    events: E,
    weights: ScoreWeights,
}

impl<I, E> RelevanceEngine<I, E> {
    /// Creates an engine with the default production weights.
    #[must_use]
    pub fn new(interactions: I, events: E) -> Self {
        Self::with_weights(interactions, events, ScoreWeights::default())
    }

    /// Creates an engine with custom weights.
    #[must_use]
    pub const fn with_weights(interactions: I, events: E, weights: ScoreWeights) -> Self {
        Self {
            interactions,
            events,
            weights,
        }
    }
}

impl<I, E> RelevanceEngine<I, E>
where
    I: InteractionStore,
    E: EventStore,
{
    /// Aggregates the normalised tags of every event the user interacted
    /// with.
    ///
    /// Interactions pointing at events missing from the catalogue
    /// contribute nothing. The result is freshly aggregated on each call,
    /// so recommendations reflect activity recorded since the store was
    /// loaded.
    #[must_use]
    pub fn interacted_tags(&self, user_id: u64) -> BTreeSet<String> {
        let mut tags = BTreeSet::new();
        for interaction in self.interactions.interactions_for(user_id) {
            let Some(event) = self.events.find_event(interaction.event_id) else {
                continue;
            };
            tags.extend(normalise(&event.tags));
        }
        tags
    }

    #[expect(clippy::float_arithmetic, reason = "relevance scoring sums weighted terms")]
    fn score_warm(
        &self,
        user: &User,
        event: &Event,
        interacted: &BTreeSet<String>,
    ) -> ScoringResult {
        let weights = &self.weights;
        let event_tags = normalise(&event.tags);
        let interests = normalise(&user.interests);

        let mut score = 0.0_f64;
        let mut reasons = Vec::new();

        // BTreeSet iteration makes the matched interest the lexicographically
        // first one, keeping explanations stable between runs.
        if let Some(interest) = interests
            .iter()
            .find(|interest| event_tags.contains(interest.as_str()))
        {
            score += weights.interest_match;
            reasons.push(Reason::InterestMatch(interest.clone()));
        }

        if !event_tags.is_disjoint(interacted) {
            score += weights.personalisation_boost;
            reasons.push(Reason::PastActivity);
        }

        score += f64::from(event.coding_impact_score)
            * weights.coding_impact
            * user.coding_preference.value();
        score += f64::from(event.communication_impact_score)
            * weights.communication_impact
            * user.communication_preference.value();
        score += f64::from(event.popularity_score) * weights.popularity;

        if shares_location(user, event) {
            score += weights.same_location_bonus;
            reasons.push(Reason::SameLocation);
        } else {
            match event.mode {
                EventMode::Online => {
                    score += weights.online_bonus;
                    reasons.push(Reason::OnlineAvailability);
                }
                EventMode::Offline => {}
            }
        }

        ScoringResult::new(score, explanation_from(&reasons))
    }
}

impl<I, E> Scorer for RelevanceEngine<I, E>
where
    I: InteractionStore + Send + Sync,
    E: EventStore + Send + Sync,
{
    fn evaluate(&self, user: &User, event: &Event, today: NaiveDate) -> ScoringResult {
        let interacted = self.interacted_tags(user.id);
        if is_cold_start(user, &interacted) {
            log::debug!(
                "user {} has no scoring signal; using the popularity fallback for event {}",
                user.id,
                event.id,
            );
            return ScoringResult::new(fallback_score(event, today), fallback_explanation(event));
        }
        self.score_warm(user, event, &interacted)
    }
}
