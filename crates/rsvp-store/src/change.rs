//! Change notifications broadcast by the store.

use rsvp_models::{Event, EventId, UserId};

/// A successful, persisted mutation of the event collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// A new event was appended.
    Added(Event),
    /// An event's fields were updated.
    Updated(Event),
    /// An event was removed.
    Deleted(Event),
    /// A user's RSVP was flipped.
    RsvpToggled {
        event: Event,
        user: UserId,
        /// Whether the user is attending after the toggle.
        attending: bool,
    },
}

impl StoreChange {
    /// ID of the event the change applies to.
    pub fn event_id(&self) -> &EventId {
        match self {
            StoreChange::Added(event)
            | StoreChange::Updated(event)
            | StoreChange::Deleted(event)
            | StoreChange::RsvpToggled { event, .. } => &event.id,
        }
    }
}
