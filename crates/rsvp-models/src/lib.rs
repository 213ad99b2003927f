//! Core data models for the RSVP tracker.
//!
//! This crate provides the fundamental data types shared by the store, the
//! mock API and the command line: events, identifiers, the event form with
//! its validation rules, and the fixture data used to seed a fresh store.

pub mod builders;
pub mod event;
pub mod fixtures;
pub mod form;
pub mod ids;

// Re-export main types
pub use builders::EventBuilder;
pub use event::{parse_event_date, Category, Event};
pub use form::{EventDraft, EventForm, EventPatch, FieldError, FormField, ValidationErrors};
pub use ids::{EventId, UserId};
