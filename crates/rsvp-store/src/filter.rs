//! Event filtering for queries.

use chrono::NaiveDate;
use rsvp_models::{Category, Event, UserId};

/// Filter criteria for querying events. All set criteria must match.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Filter by category.
    pub category: Option<Category>,
    /// Filter by creator.
    pub creator: Option<UserId>,
    /// Only events on or after this date; results are ordered by date.
    pub upcoming_from: Option<NaiveDate>,
}

impl EventFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title search term. A blank term matches everything.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_lowercase();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the creator filter.
    pub fn with_creator(mut self, creator: UserId) -> Self {
        self.creator = Some(creator);
        self
    }

    /// Keeps only events dated on or after `today`.
    pub fn upcoming_from(mut self, today: NaiveDate) -> Self {
        self.upcoming_from = Some(today);
        self
    }

    /// Returns true if matching events should be listed by date.
    pub fn orders_by_date(&self) -> bool {
        self.upcoming_from.is_some()
    }

    /// Returns true if the event matches this filter.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(ref term) = self.search {
            if !event.title.to_lowercase().contains(term.as_str()) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if event.category != category {
                return false;
            }
        }

        if let Some(ref creator) = self.creator {
            if !event.is_created_by(creator) {
                return false;
            }
        }

        if let Some(today) = self.upcoming_from {
            if !event.is_upcoming(today) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_event(title: &str, category: Category) -> Event {
        Event::builder(title, day(2099, 1, 1))
            .category(category)
            .build()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = EventFilter::new();
        let event = make_event("Anything", Category::Other);
        assert!(filter.matches(&event));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = EventFilter::new().with_search("REACT");

        let e1 = make_event("React Conference 2025", Category::Conference);
        let e2 = make_event("JavaScript Workshop", Category::Workshop);

        assert!(filter.matches(&e1));
        assert!(!filter.matches(&e2));
    }

    #[test]
    fn test_search_only_looks_at_title() {
        let filter = EventFilter::new().with_search("austin");
        let event = Event::builder("Tech Meetup", day(2099, 1, 1))
            .location("Austin, TX")
            .build();

        assert!(!filter.matches(&event));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = EventFilter::new().with_search("   ");
        assert!(filter.search.is_none());
        assert!(filter.matches(&make_event("Anything", Category::Other)));
    }

    #[test]
    fn test_filter_by_category() {
        let filter = EventFilter::new().with_category(Category::Workshop);

        let e1 = make_event("A", Category::Workshop);
        let e2 = make_event("B", Category::Meetup);

        assert!(filter.matches(&e1));
        assert!(!filter.matches(&e2));
    }

    #[test]
    fn test_filter_by_creator() {
        let filter = EventFilter::new().with_creator(UserId::from("alice"));

        let mine = Event::builder("Mine", day(2099, 1, 1))
            .created_by("alice")
            .build();
        let theirs = Event::builder("Theirs", day(2099, 1, 1))
            .created_by("bob")
            .build();
        let seeded = Event::builder("Seeded", day(2099, 1, 1)).build();

        assert!(filter.matches(&mine));
        assert!(!filter.matches(&theirs));
        assert!(!filter.matches(&seeded));
    }

    #[test]
    fn test_upcoming_includes_today() {
        let today = day(2026, 10, 17);
        let filter = EventFilter::new().upcoming_from(today);

        let past = Event::builder("Past", day(2026, 10, 16)).build();
        let now = Event::builder("Now", today).build();
        let future = Event::builder("Future", day(2026, 12, 1)).build();

        assert!(!filter.matches(&past));
        assert!(filter.matches(&now));
        assert!(filter.matches(&future));
        assert!(filter.orders_by_date());
    }

    #[test]
    fn test_combined_filters() {
        let filter = EventFilter::new()
            .with_search("conf")
            .with_category(Category::Conference);

        let e1 = make_event("React Conference", Category::Conference);
        let e2 = make_event("Conference Workshop", Category::Workshop);
        let e3 = make_event("Summit", Category::Conference);

        assert!(filter.matches(&e1));
        assert!(!filter.matches(&e2)); // wrong category
        assert!(!filter.matches(&e3)); // no title match
    }
}
