//! Read-side access to the event catalogue.
//!
//! The engine reads through three narrow traits so scoring and ranking stay
//! independent of where the catalogue lives. The SQLite store implements all
//! three; tests substitute in-memory fixtures.
//!
//! Each trait is also implemented for `Arc<T>`, so a single eager-loaded
//! store can serve the scorer and the ranker without reopening anything.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::event::Event;
use crate::interaction::Interaction;
use crate::user::User;

#[cfg(feature = "store-sqlite")]
pub mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteEventStore, SqliteEventStoreError};

/// Read access to the event catalogue.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eventide_core::store::EventStore;
/// use eventide_core::{Event, EventCategory, EventMode};
///
/// struct Fixed(Vec<Event>);
///
/// impl EventStore for Fixed {
///     fn events_on_or_after(
///         &self,
///         date: NaiveDate,
///     ) -> Box<dyn Iterator<Item = Event> + Send + '_> {
///         Box::new(
///             self.0
///                 .iter()
///                 .filter(move |event| event.date.is_some_and(|d| d >= date))
///                 .cloned(),
///         )
///     }
///
///     fn find_event(&self, id: u64) -> Option<Event> {
///         self.0.iter().find(|event| event.id == id).cloned()
///     }
/// }
///
/// let date = NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date");
/// let store = Fixed(vec![
///     Event::new(1, "Security Best Practices", EventCategory::Webinar, EventMode::Online)
///         .with_date(date),
/// ]);
/// assert_eq!(store.events_on_or_after(date).count(), 1);
/// assert!(store.find_event(2).is_none());
/// ```
pub trait EventStore {
    /// Streams events scheduled on or after `date`.
    ///
    /// Events without a date are never yielded; an unscheduled event cannot
    /// be "upcoming".
    fn events_on_or_after(&self, date: NaiveDate) -> Box<dyn Iterator<Item = Event> + Send + '_>;

    /// Looks up a single event by identifier.
    fn find_event(&self, id: u64) -> Option<Event>;
}

/// Read access to recorded user activity.
pub trait InteractionStore {
    /// Streams every interaction recorded for `user_id`.
    ///
    /// Yields nothing for users with no recorded activity; that state is
    /// ordinary, not an error.
    fn interactions_for(&self, user_id: u64) -> Box<dyn Iterator<Item = Interaction> + Send + '_>;
}

/// Read access to user profiles.
pub trait UserStore {
    /// Looks up a user by sign-in address.
    fn find_by_email(&self, email: &str) -> Option<User>;
}

impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    fn events_on_or_after(&self, date: NaiveDate) -> Box<dyn Iterator<Item = Event> + Send + '_> {
        self.as_ref().events_on_or_after(date)
    }

    fn find_event(&self, id: u64) -> Option<Event> {
        self.as_ref().find_event(id)
    }
}

impl<S> InteractionStore for Arc<S>
where
    S: InteractionStore + ?Sized,
{
    fn interactions_for(&self, user_id: u64) -> Box<dyn Iterator<Item = Interaction> + Send + '_> {
        self.as_ref().interactions_for(user_id)
    }
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn find_by_email(&self, email: &str) -> Option<User> {
        self.as_ref().find_by_email(email)
    }
}
