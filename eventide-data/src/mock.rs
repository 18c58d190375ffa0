//! Deterministic mock catalogue generation.
//!
//! Seeded generation keeps demo environments reproducible: the same seed
//! always yields the same events, so ranking output can be compared across
//! machines and runs.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use eventide_core::{Event, EventCategory, EventMode, User};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of events produced by a default seeding run.
pub const EVENTS_PER_RUN: usize = 20;

const TITLES: [&str; 10] = [
    "Spring Boot Meetup",
    "Java Performance Workshop",
    "Cloud Native Summit",
    "Product Design Sprint",
    "AI for Developers",
    "Security Best Practices",
    "Data Engineering Bootcamp",
    "Startup Pitch Night",
    "UX Research Lab",
    "Kotlin for Backend",
];

const LOCATIONS: [&str; 10] = [
    "Mumbai",
    "Pune",
    "Bengaluru",
    "Hyderabad",
    "Chennai",
    "Delhi",
    "Kolkata",
    "Remote",
    "Singapore",
    "Dubai",
];

const TAG_POOL: [&str; 10] = [
    "java", "spring", "backend", "cloud", "security", "ai", "design", "data", "startup", "devops",
];

const CATEGORIES: [EventCategory; 5] = [
    EventCategory::Workshop,
    EventCategory::Meetup,
    EventCategory::Conference,
    EventCategory::Hackathon,
    EventCategory::Webinar,
];

const MODES: [EventMode; 2] = [EventMode::Online, EventMode::Offline];

const MIN_TAGS: usize = 2;
const MAX_TAGS: usize = 4;

/// Generated events are dated between one and this many days ahead.
const MAX_LEAD_DAYS: u64 = 60;

const DESCRIPTION: &str = "Auto-generated event for testing purposes.";

/// Generate `count` upcoming events with sequential ids starting at `first_id`.
///
/// Titles, locations, categories, modes, and tags are drawn from fixed pools;
/// impact and popularity scores fall in `1..=100`. Every event is dated
/// within sixty days after `today`, so a freshly seeded catalogue ranks in
/// full.
#[must_use]
pub fn generate_events<R: Rng>(
    rng: &mut R,
    count: usize,
    today: NaiveDate,
    first_id: u64,
) -> Vec<Event> {
    (0..count)
        .map(|index| {
            let id = first_id.wrapping_add(index as u64);
            generate_event(rng, id, today)
        })
        .collect()
}

fn generate_event<R: Rng>(rng: &mut R, id: u64, today: NaiveDate) -> Event {
    let title = TITLES.choose(rng).copied().unwrap_or("Community Event");
    let location = LOCATIONS.choose(rng).copied().unwrap_or("Remote");
    let category = CATEGORIES
        .choose(rng)
        .copied()
        .unwrap_or(EventCategory::Meetup);
    let mode = MODES.choose(rng).copied().unwrap_or(EventMode::Online);
    let lead_days = rng.gen_range(1..=MAX_LEAD_DAYS);
    let tag_count = rng.gen_range(MIN_TAGS..=MAX_TAGS);

    let mut event = Event::new(id, title, category, mode)
        .with_description(DESCRIPTION)
        .with_tags(pick_tags(rng, tag_count))
        .with_location(location)
        .with_impact_scores(rng.gen_range(1..=100), rng.gen_range(1..=100))
        .with_popularity(rng.gen_range(1..=100));
    if let Some(date) = today.checked_add_days(Days::new(lead_days)) {
        event = event.with_date(date);
    }
    event
}

/// Draw `target` distinct tags from the pool.
fn pick_tags<R: Rng>(rng: &mut R, target: usize) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    while tags.len() < target {
        let Some(tag) = TAG_POOL.choose(rng) else {
            break;
        };
        tags.insert((*tag).to_owned());
    }
    tags
}

/// Fixed demonstration users spanning the warm and cold scoring paths.
#[must_use]
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "alice@example.com")
            .with_interests(["java", "cloud"])
            .with_skills(["spring"])
            .with_location("Mumbai")
            .with_coding_preference(0.8)
            .with_communication_preference(0.4),
        User::new(2, "bob@example.com")
            .with_interests(["ai", "data"])
            .with_skills(["python"])
            .with_location("Bengaluru")
            .with_coding_preference(0.6)
            .with_communication_preference(0.7),
        User::new(3, "carol@example.com"),
    ]
}

/// Build a full demo catalogue from a seed.
///
/// # Examples
///
/// ```
/// let today = chrono::NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date");
/// let (events, users) = eventide_data::mock::catalogue(42, 5, today);
/// assert_eq!(events.len(), 5);
/// assert_eq!(users.len(), 3);
/// assert_eq!(eventide_data::mock::catalogue(42, 5, today).0, events);
/// ```
#[must_use]
pub fn catalogue(seed: u64, count: usize, today: NaiveDate) -> (Vec<Event>, Vec<User>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (generate_events(&mut rng, count, today, 1), demo_users())
}
