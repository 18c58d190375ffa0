//! In-memory fixtures shared by tests across the workspace.
//!
//! [`MemoryStore`] implements every store trait over plain vectors, so
//! scorer and ranker tests can assemble a catalogue inline without touching
//! SQLite.

use chrono::NaiveDate;

use crate::event::Event;
use crate::interaction::Interaction;
use crate::store::{EventStore, InteractionStore, UserStore};
use crate::user::User;

/// An in-memory catalogue for tests.
///
/// # Examples
///
/// ```
/// use eventide_core::test_support::MemoryStore;
/// use eventide_core::store::UserStore;
/// use eventide_core::User;
///
/// let store = MemoryStore::default().with_user(User::new(1, "kim@example.com"));
/// assert!(store.find_by_email("kim@example.com").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
    users: Vec<User>,
    interactions: Vec<Interaction>,
}

impl MemoryStore {
    /// Adds one event to the catalogue.
    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Adds a batch of events to the catalogue.
    #[must_use]
    pub fn with_events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        self.events.extend(events);
        self
    }

    /// Adds one user profile.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Adds one recorded interaction.
    #[must_use]
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    /// Adds a batch of recorded interactions.
    #[must_use]
    pub fn with_interactions<I>(mut self, interactions: I) -> Self
    where
        I: IntoIterator<Item = Interaction>,
    {
        self.interactions.extend(interactions);
        self
    }
}

impl EventStore for MemoryStore {
    fn events_on_or_after(&self, date: NaiveDate) -> Box<dyn Iterator<Item = Event> + Send + '_> {
        Box::new(
            self.events
                .iter()
                .filter(move |event| event.date.is_some_and(|scheduled| scheduled >= date))
                .cloned(),
        )
    }

    fn find_event(&self, id: u64) -> Option<Event> {
        self.events.iter().find(|event| event.id == id).cloned()
    }
}

impl InteractionStore for MemoryStore {
    fn interactions_for(&self, user_id: u64) -> Box<dyn Iterator<Item = Interaction> + Send + '_> {
        Box::new(
            self.interactions
                .iter()
                .filter(move |interaction| interaction.user_id == user_id)
                .copied(),
        )
    }
}

impl UserStore for MemoryStore {
    fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.iter().find(|user| user.email == email).cloned()
    }
}
