//! Strongly-typed identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of an event.
///
/// Freshly created events get an `evt-` prefixed UUID. Identifiers loaded
/// from storage or fixtures are kept verbatim (seed data uses `"1"`, `"2"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generates a new unique event ID.
    pub fn new() -> Self {
        Self(format!("evt-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity of a user that creates events or RSVPs to them.
///
/// There is no authentication; callers pass the acting user explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Identity used when no user is configured.
    pub const CURRENT: &'static str = "current-user";

    /// Creator recorded on the mock API fixtures.
    pub const SYSTEM: &'static str = "system";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The simulated signed-in user.
    pub fn current() -> Self {
        Self(Self::CURRENT.to_string())
    }

    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_new_is_prefixed() {
        let id = EventId::new();
        assert!(id.as_str().starts_with("evt-"));
    }

    #[test]
    fn test_event_id_new_is_unique() {
        let a = EventId::new();
        let b = EventId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_event_id_serializes_as_plain_string() {
        let id = EventId::from("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");

        let back: EventId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_user_id_defaults_to_current_user() {
        assert_eq!(UserId::default().as_str(), "current-user");
        assert_eq!(UserId::current(), UserId::from("current-user"));
    }
}
