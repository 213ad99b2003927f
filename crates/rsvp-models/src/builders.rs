//! Builder patterns for complex types.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::event::{Category, Event};
use crate::ids::{EventId, UserId};

/// Builder for creating Event instances with a fluent API.
///
/// Used for fixture data and tests; user-created events go through
/// [`Event::new`] with a validated draft instead.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    id: Option<EventId>,
    title: String,
    date: NaiveDate,
    description: String,
    location: String,
    category: Category,
    created_by: Option<UserId>,
    rsvp_count: u32,
    rsvp_users: BTreeSet<UserId>,
}

impl EventBuilder {
    /// Creates a new EventBuilder with required fields.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            date,
            description: String::new(),
            location: String::new(),
            category: Category::default(),
            created_by: None,
            rsvp_count: 0,
            rsvp_users: BTreeSet::new(),
        }
    }

    /// Sets a fixed ID (a fresh one is generated otherwise).
    pub fn id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn created_by(mut self, user: impl Into<UserId>) -> Self {
        self.created_by = Some(user.into());
        self
    }

    /// Sets the attendance count.
    pub fn rsvp_count(mut self, count: u32) -> Self {
        self.rsvp_count = count;
        self
    }

    /// Adds a user to the RSVP set without touching the count.
    pub fn rsvp_user(mut self, user: impl Into<UserId>) -> Self {
        self.rsvp_users.insert(user.into());
        self
    }

    /// Builds the Event.
    pub fn build(self) -> Event {
        Event {
            id: self.id.unwrap_or_default(),
            title: self.title,
            description: self.description,
            date: self.date,
            location: self.location,
            category: self.category,
            created_by: self.created_by,
            rsvp_count: self.rsvp_count,
            rsvp_users: self.rsvp_users,
            stored_rsvp: false,
        }
    }
}

/// Convenience methods on Event for creating builders.
impl Event {
    /// Creates a builder for a new event.
    pub fn builder(title: impl Into<String>, date: NaiveDate) -> EventBuilder {
        EventBuilder::new(title, date)
    }
}
