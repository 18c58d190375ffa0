//! Tunable weights for the relevance formula.

/// Popularity at or above which a fallback recommendation is described as
/// popular rather than merely upcoming.
pub const POPULAR_EXPLANATION_THRESHOLD: i32 = 70;

/// Weights applied to each term of the relevance formula.
///
/// The defaults carry the production tuning. A weight of zero disables its
/// term, which is how tests isolate individual signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Added once when an event tag matches a declared interest.
    pub interest_match: f64,
    /// Added once when an event tag matches the user's interaction history.
    pub personalisation_boost: f64,
    /// Scales the event's coding impact score, before the user's preference.
    pub coding_impact: f64,
    /// Scales the event's communication impact score, before the user's
    /// preference.
    pub communication_impact: f64,
    /// Scales the event's popularity score.
    pub popularity: f64,
    /// Added when the user and the event share a location.
    pub same_location_bonus: f64,
    /// Added when an event without a location match is online.
    pub online_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            interest_match: 25.0,
            personalisation_boost: 15.0,
            coding_impact: 0.3,
            communication_impact: 0.2,
            popularity: 0.1,
            same_location_bonus: 20.0,
            online_bonus: 10.0,
        }
    }
}
