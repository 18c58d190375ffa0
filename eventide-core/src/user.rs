//! Users and their learning preferences.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A preference weight in the closed interval `[0.0, 1.0]`.
///
/// Weights scale an event's impact scores during relevance scoring.
/// Construction clamps out-of-range input and maps non-finite input to
/// [`PreferenceWeight::NEUTRAL`], so downstream arithmetic never sees a
/// value outside the interval.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct PreferenceWeight(f64);

impl PreferenceWeight {
    /// The midpoint weight used when a user has expressed no preference.
    pub const NEUTRAL: Self = Self(0.5);

    /// Creates a weight, clamping `raw` into `[0.0, 1.0]`.
    #[must_use]
    pub fn new(raw: f64) -> Self {
        if raw.is_finite() {
            Self(raw.clamp(0.0, 1.0))
        } else {
            Self::NEUTRAL
        }
    }

    /// Returns the weight as a plain `f64`.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for PreferenceWeight {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<f64> for PreferenceWeight {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}

impl From<PreferenceWeight> for f64 {
    fn from(weight: PreferenceWeight) -> Self {
        weight.value()
    }
}

/// A user profile as the scorer sees it.
///
/// Interests and skills are stored raw and normalised at evaluation time.
/// Preferences default to [`PreferenceWeight::NEUTRAL`] when the upstream
/// record omits them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct User {
    /// Stable identifier, also the key for the user's interaction history.
    pub id: u64,
    /// Sign-in address; the lookup key for command-line flows.
    pub email: String,
    /// Topics the user has declared an interest in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interests: BTreeSet<String>,
    /// Skills the user has listed on their profile.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: BTreeSet<String>,
    /// Home city, if declared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    /// How much the user values improving coding ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub coding_preference: PreferenceWeight,
    /// How much the user values improving communication ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub communication_preference: PreferenceWeight,
}

impl User {
    /// Creates a user with neutral preferences and no declared topics.
    #[must_use]
    pub fn new(id: u64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            interests: BTreeSet::new(),
            skills: BTreeSet::new(),
            location: None,
            coding_preference: PreferenceWeight::NEUTRAL,
            communication_preference: PreferenceWeight::NEUTRAL,
        }
    }

    /// Replaces the user's declared interests.
    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the user's listed skills.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the user's home city.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the coding preference, clamping into `[0.0, 1.0]`.
    #[must_use]
    pub fn with_coding_preference(mut self, raw: f64) -> Self {
        self.coding_preference = PreferenceWeight::new(raw);
        self
    }

    /// Sets the communication preference, clamping into `[0.0, 1.0]`.
    #[must_use]
    pub fn with_communication_preference(mut self, raw: f64) -> Self {
        self.communication_preference = PreferenceWeight::new(raw);
        self
    }
}
