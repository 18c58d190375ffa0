//! Events available for recommendation.
//!
//! An [`Event`] carries the catalogue fields the scoring engine consumes:
//! free-text tags, an optional location and date, and the numeric impact
//! scores that feed the weighted relevance formula. Construction is by
//! [`Event::new`] plus chained `with_*` setters, so fixtures and seed data
//! only mention the fields they care about.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Broad category an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EventCategory {
    /// Hands-on sessions with a practical focus.
    Workshop,
    /// Informal community gatherings.
    Meetup,
    /// Multi-track events with scheduled talks.
    Conference,
    /// Competitive build-something events.
    Hackathon,
    /// Online-first broadcast sessions.
    Webinar,
}

impl EventCategory {
    /// Returns the lowercase identifier used in storage and command-line
    /// arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workshop => "workshop",
            Self::Meetup => "meetup",
            Self::Conference => "conference",
            Self::Hackathon => "hackathon",
            Self::Webinar => "webinar",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "workshop" => Ok(Self::Workshop),
            "meetup" => Ok(Self::Meetup),
            "conference" => Ok(Self::Conference),
            "hackathon" => Ok(Self::Hackathon),
            "webinar" => Ok(Self::Webinar),
            other => Err(format!("unknown event category: {other}")),
        }
    }
}

/// Whether attendees join remotely or in person.
///
/// The variant set is closed on purpose: bonus selection during scoring
/// matches on it exhaustively, so a new delivery mode cannot be added
/// without deciding how it scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EventMode {
    /// Attendees join remotely.
    Online,
    /// Attendees meet at the event's venue.
    Offline,
}

impl EventMode {
    /// Returns the lowercase identifier used in storage and command-line
    /// arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            other => Err(format!("unknown event mode: {other}")),
        }
    }
}

/// A single event in the recommendation catalogue.
///
/// Tags are stored raw; the scorer normalises them at evaluation time.
/// `location` and `date` are optional because upstream feeds omit them for
/// online-only or yet-to-be-scheduled events. Impact scores default to zero
/// and popularity accrues through recorded interactions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    /// Stable catalogue identifier.
    pub id: u64,
    /// Human-readable title.
    pub title: String,
    /// Free-text description shown alongside recommendations.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Broad category the event belongs to.
    pub category: EventCategory,
    /// Free-text tags describing the event's topics.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
    /// Venue city, if the event has one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    /// Whether attendees join remotely or in person.
    pub mode: EventMode,
    /// Scheduled date, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<NaiveDate>,
    /// How strongly the event develops coding ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub coding_impact_score: i32,
    /// How strongly the event develops communication ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub communication_impact_score: i32,
    /// Accumulated popularity from views and registrations.
    #[cfg_attr(feature = "serde", serde(default))]
    pub popularity_score: i32,
}

impl Event {
    /// Creates an event with the given identity and delivery details.
    ///
    /// Every other field starts empty or at zero; chain the `with_*`
    /// setters to fill in the rest.
    #[must_use]
    pub fn new(
        id: u64,
        title: impl Into<String>,
        category: EventCategory,
        mode: EventMode,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category,
            tags: BTreeSet::new(),
            location: None,
            mode,
            date: None,
            coding_impact_score: 0,
            communication_impact_score: 0,
            popularity_score: 0,
        }
    }

    /// Replaces the event's description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the event's tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the venue city.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the scheduled date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the coding and communication impact scores.
    #[must_use]
    pub const fn with_impact_scores(mut self, coding: i32, communication: i32) -> Self {
        self.coding_impact_score = coding;
        self.communication_impact_score = communication;
        self
    }

    /// Sets the popularity score.
    #[must_use]
    pub const fn with_popularity(mut self, popularity: i32) -> Self {
        self.popularity_score = popularity;
        self
    }
}
