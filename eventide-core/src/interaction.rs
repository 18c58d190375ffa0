//! Recorded user activity against catalogue events.
//!
//! Interactions drive two things: they grow an event's popularity score as
//! activity is logged, and they feed the "based on your past activity" signal
//! when the tags of previously touched events overlap a candidate's tags.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of activity a user performed on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InteractionKind {
    /// The user opened the event's detail page.
    View,
    /// The user registered to attend.
    Register,
}

impl InteractionKind {
    /// Returns the lowercase identifier used in storage and command-line
    /// arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Register => "register",
        }
    }

    /// Popularity gained by the event when this interaction is recorded.
    ///
    /// A registration signals far stronger intent than a view, so it is
    /// worth five times as much.
    #[must_use]
    pub const fn popularity_boost(self) -> i32 {
        match self {
            Self::View => 1,
            Self::Register => 5,
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "register" => Ok(Self::Register),
            other => Err(format!("unknown interaction kind: {other}")),
        }
    }
}

/// A single recorded interaction between a user and an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interaction {
    /// The user who acted.
    pub user_id: u64,
    /// The event acted upon.
    pub event_id: u64,
    /// What the user did.
    pub kind: InteractionKind,
}

impl Interaction {
    /// Creates an interaction record.
    #[must_use]
    pub const fn new(user_id: u64, event_id: u64, kind: InteractionKind) -> Self {
        Self {
            user_id,
            event_id,
            kind,
        }
    }
}
