//! Static fixture events.
//!
//! [`seed_events`] populates a store that has nothing persisted yet;
//! [`mock_api_events`] is what the mock `/api/events` endpoint serves.

use chrono::NaiveDate;

use crate::event::{Category, Event};
use crate::ids::UserId;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Events a fresh store starts with.
///
/// The current user is already attending "Tech Meetup", and is counted in
/// its attendance.
pub fn seed_events() -> Vec<Event> {
    vec![
        Event::builder("React Conference 2025", date(2025, 9, 15))
            .id("1")
            .description(
                "A comprehensive conference covering the latest in React development, \
                 featuring industry experts and hands-on workshops.",
            )
            .location("San Francisco, CA")
            .category(Category::Conference)
            .rsvp_count(45)
            .build(),
        Event::builder("JavaScript Workshop", date(2025, 9, 20))
            .id("2")
            .description(
                "Interactive workshop focusing on modern JavaScript ES6+ features, \
                 async programming, and best practices.",
            )
            .location("New York, NY")
            .category(Category::Workshop)
            .rsvp_count(23)
            .build(),
        Event::builder("Tech Meetup", date(2025, 9, 25))
            .id("3")
            .description(
                "Monthly networking event for tech professionals. Great opportunity to \
                 meet like-minded developers and entrepreneurs.",
            )
            .location("Austin, TX")
            .category(Category::Meetup)
            .rsvp_count(67)
            .rsvp_user(UserId::current())
            .build(),
        Event::builder("Web Development Bootcamp", date(2025, 10, 5))
            .id("4")
            .description(
                "Intensive 3-day bootcamp covering full-stack web development with React, \
                 Node.js, and MongoDB.",
            )
            .location("Seattle, WA")
            .category(Category::Workshop)
            .rsvp_count(89)
            .build(),
        Event::builder("AI & Machine Learning Summit", date(2025, 10, 12))
            .id("5")
            .description(
                "Explore the latest trends in AI and ML with leading researchers and \
                 industry practitioners.",
            )
            .location("Boston, MA")
            .category(Category::Conference)
            .rsvp_count(156)
            .build(),
    ]
}

/// Events returned by `GET /api/events`.
pub fn mock_api_events() -> Vec<Event> {
    vec![
        Event::builder("React Conference 2025", date(2025, 10, 15))
            .id("1")
            .description("A comprehensive conference about React and modern web development")
            .location("San Francisco, CA")
            .category(Category::Conference)
            .created_by(UserId::system())
            .rsvp_count(150)
            .build(),
        Event::builder("TypeScript Workshop", date(2025, 9, 20))
            .id("2")
            .description("Learn advanced TypeScript concepts and best practices")
            .location("New York, NY")
            .category(Category::Workshop)
            .created_by(UserId::system())
            .rsvp_count(50)
            .build(),
        Event::builder("Web Dev Meetup", date(2025, 9, 10))
            .id("3")
            .description("Monthly meetup for web developers to network and share knowledge")
            .location("Los Angeles, CA")
            .category(Category::Meetup)
            .created_by(UserId::system())
            .rsvp_count(75)
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let events = seed_events();
        let ids: HashSet<_> = events.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), events.len());
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_seed_counts_cover_rsvp_sets() {
        for event in seed_events() {
            assert!(event.rsvp_count as usize >= event.rsvp_users.len());
        }
    }

    #[test]
    fn test_current_user_attends_tech_meetup() {
        let events = seed_events();
        let meetup = events.iter().find(|e| e.id.as_str() == "3").unwrap();
        assert!(meetup.has_rsvp(&UserId::current()));
    }

    #[test]
    fn test_mock_api_events_created_by_system() {
        let events = mock_api_events();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.is_created_by(&UserId::system())));
        assert!(events.iter().all(|e| e.rsvp_users.is_empty()));
    }
}
