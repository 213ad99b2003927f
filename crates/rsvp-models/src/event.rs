//! Event types for the RSVP tracker.
//!
//! Events are what users browse, create and RSVP to. Attendance is tracked
//! both as an explicit set of users and as a stored count; the count is
//! unsigned and every decrement saturates, so it can never go negative.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::form::{EventDraft, EventPatch};
use crate::ids::{EventId, UserId};

/// Category of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Conference,
    Workshop,
    Meetup,
    Networking,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Conference,
        Category::Workshop,
        Category::Meetup,
        Category::Networking,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Conference => "Conference",
            Category::Workshop => "Workshop",
            Category::Meetup => "Meetup",
            Category::Networking => "Networking",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parses a category name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// An event that users can RSVP to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, never changed after creation.
    pub id: EventId,

    pub title: String,

    pub description: String,

    /// Day the event takes place.
    #[serde(with = "iso_date")]
    pub date: NaiveDate,

    pub location: String,

    pub category: Category,

    /// User that created the event, if it was created through the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,

    /// Number of attendees.
    #[serde(default)]
    pub rsvp_count: u32,

    /// Users that have RSVP'd.
    #[serde(default)]
    pub rsvp_users: BTreeSet<UserId>,

    /// Attendance flag of the current user, as older entries stored it.
    /// Read but never written back.
    #[serde(default, rename = "hasRSVP", skip_serializing)]
    pub(crate) stored_rsvp: bool,
}

impl Event {
    /// Creates a new event from a draft, with no attendees.
    pub fn new(draft: EventDraft, creator: UserId) -> Self {
        Self {
            id: EventId::new(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            location: draft.location,
            category: draft.category,
            created_by: Some(creator),
            rsvp_count: 0,
            rsvp_users: BTreeSet::new(),
            stored_rsvp: false,
        }
    }

    /// Returns true if `user` has RSVP'd to this event.
    pub fn has_rsvp(&self, user: &UserId) -> bool {
        self.rsvp_users.contains(user)
    }

    /// Returns true if `user` created this event.
    pub fn is_created_by(&self, user: &UserId) -> bool {
        self.created_by.as_ref() == Some(user)
    }

    /// Returns true if the event takes place on or after `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    /// Flips the RSVP of `user` and adjusts the count by one.
    ///
    /// Returns true if the user is attending after the toggle.
    pub fn toggle_rsvp(&mut self, user: &UserId) -> bool {
        if self.rsvp_users.remove(user) {
            self.rsvp_count = self.rsvp_count.saturating_sub(1);
            false
        } else {
            self.rsvp_users.insert(user.clone());
            self.rsvp_count = self.rsvp_count.saturating_add(1);
            true
        }
    }

    /// Moves a `hasRSVP` flag read from an older entry into the RSVP set as
    /// `user`. The stored count already includes them, so it is left alone.
    ///
    /// Returns true if the entry carried the flag.
    pub fn adopt_stored_rsvp(&mut self, user: &UserId) -> bool {
        if !std::mem::take(&mut self.stored_rsvp) {
            return false;
        }
        self.rsvp_users.insert(user.clone());
        true
    }

    /// Raises the count to at least the number of RSVP'd users.
    ///
    /// Returns true if the count had to be changed.
    pub fn reconcile_count(&mut self) -> bool {
        let members = u32::try_from(self.rsvp_users.len()).unwrap_or(u32::MAX);
        if self.rsvp_count < members {
            self.rsvp_count = members;
            true
        } else {
            false
        }
    }

    /// Merges the supplied fields of `patch` into this event.
    pub fn apply(&mut self, patch: &EventPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

/// Parses an event date.
///
/// Accepts a plain ISO date (`2025-09-15`), an RFC 3339 timestamp, or a
/// local date-time as produced by HTML `datetime-local` inputs. Time
/// components are dropped.
pub fn parse_event_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_event_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid event date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::EventBuilder;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_from_str_ignores_case() {
        assert_eq!("workshop".parse::<Category>().unwrap(), Category::Workshop);
        assert_eq!("MEETUP".parse::<Category>().unwrap(), Category::Meetup);
        assert!("party".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_name() {
        let json = serde_json::to_string(&Category::Networking).unwrap();
        assert_eq!(json, "\"Networking\"");
    }

    #[test]
    fn test_toggle_rsvp_adds_then_removes() {
        let mut event = EventBuilder::new("Meetup", day(2099, 1, 1))
            .rsvp_count(5)
            .build();
        let user = UserId::from("u1");

        assert!(event.toggle_rsvp(&user));
        assert_eq!(event.rsvp_count, 6);
        assert!(event.has_rsvp(&user));

        assert!(!event.toggle_rsvp(&user));
        assert_eq!(event.rsvp_count, 5);
        assert!(!event.has_rsvp(&user));
    }

    #[test]
    fn test_toggle_rsvp_never_goes_negative() {
        let mut event = EventBuilder::new("Empty", day(2099, 1, 1))
            .rsvp_user("u1")
            .rsvp_count(0)
            .build();

        assert!(!event.toggle_rsvp(&UserId::from("u1")));
        assert_eq!(event.rsvp_count, 0);
    }

    #[test]
    fn test_reconcile_count() {
        let mut event = EventBuilder::new("Party", day(2099, 1, 1))
            .rsvp_user("a")
            .rsvp_user("b")
            .rsvp_count(1)
            .build();

        assert!(event.reconcile_count());
        assert_eq!(event.rsvp_count, 2);
        assert!(!event.reconcile_count());
    }

    #[test]
    fn test_apply_patch_merges_supplied_fields() {
        let mut event = EventBuilder::new("Old", day(2099, 1, 1))
            .location("Austin, TX")
            .build();
        let id = event.id.clone();

        let patch = EventPatch {
            title: Some("New".to_string()),
            category: Some(Category::Other),
            ..Default::default()
        };
        event.apply(&patch);

        assert_eq!(event.id, id);
        assert_eq!(event.title, "New");
        assert_eq!(event.category, Category::Other);
        assert_eq!(event.location, "Austin, TX");
    }

    #[test]
    fn test_parse_event_date_formats() {
        assert_eq!(parse_event_date("2025-09-15"), Some(day(2025, 9, 15)));
        assert_eq!(
            parse_event_date("2025-09-15T18:30:00Z"),
            Some(day(2025, 9, 15))
        );
        assert_eq!(parse_event_date("2025-09-15T18:30"), Some(day(2025, 9, 15)));
        assert_eq!(parse_event_date("next tuesday"), None);
        assert_eq!(parse_event_date(""), None);
    }

    #[test]
    fn test_event_json_uses_camel_case() {
        let event = EventBuilder::new("Tech Meetup", day(2025, 9, 25))
            .id("3")
            .created_by("current-user")
            .rsvp_count(67)
            .rsvp_user("current-user")
            .build();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["date"], "2025-09-25");
        assert_eq!(json["createdBy"], "current-user");
        assert_eq!(json["rsvpCount"], 67);
        assert_eq!(json["rsvpUsers"], serde_json::json!(["current-user"]));
    }

    #[test]
    fn test_event_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "1",
            "title": "React Conference 2025",
            "description": "Talks",
            "date": "2025-09-15",
            "location": "San Francisco, CA",
            "category": "Conference",
            "rsvpCount": 45,
            "hasRSVP": false
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id.as_str(), "1");
        assert!(event.created_by.is_none());
        assert!(event.rsvp_users.is_empty());
        assert_eq!(event.rsvp_count, 45);
    }

    #[test]
    fn test_adopt_stored_rsvp_keeps_count() {
        let json = r#"{
            "id": "3", "title": "Tech Meetup", "description": "d", "date": "2025-09-25",
            "location": "Austin, TX", "category": "Meetup", "rsvpCount": 67, "hasRSVP": true
        }"#;
        let mut event: Event = serde_json::from_str(json).unwrap();
        let user = UserId::current();

        assert!(!event.has_rsvp(&user));
        assert!(event.adopt_stored_rsvp(&user));
        assert!(event.has_rsvp(&user));
        assert_eq!(event.rsvp_count, 67);

        // The flag is consumed and never serialized
        assert!(!event.adopt_stored_rsvp(&user));
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("hasRSVP").is_none());
    }

    #[test]
    fn test_event_rejects_negative_count() {
        let json = r#"{
            "id": "1", "title": "t", "description": "d", "date": "2025-09-15",
            "location": "l", "category": "Other", "rsvpCount": -1
        }"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }
}
