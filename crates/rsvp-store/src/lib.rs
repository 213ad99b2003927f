//! Event store for the RSVP tracker.
//!
//! This crate provides the [`EventStore`] service, which owns the event
//! collection and offers:
//! - Queries: all events, a user's events, lookup by ID, upcoming and
//!   filtered lists
//! - Mutations: add, update, delete and RSVP toggling
//! - Persistence of the whole collection after every change
//! - Change notifications using `mpsc` channels
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rsvp_models::{fixtures, EventForm, UserId};
//! use rsvp_persistence::FileStorage;
//! use rsvp_store::{EventFilter, EventStore};
//!
//! let storage = Arc::new(FileStorage::new("/tmp/rsvp"));
//! let store = EventStore::load(storage, fixtures::seed_events()).unwrap();
//!
//! // Subscribe to changes
//! let changes = store.subscribe();
//!
//! // Validate at the boundary, then add
//! let today = chrono::Local::now().date_naive();
//! let form = EventForm {
//!     title: "Rust Meetup".into(),
//!     description: "Talks and pizza".into(),
//!     date: "2099-01-01".into(),
//!     location: "Berlin".into(),
//!     ..Default::default()
//! };
//! let event = store.add(form.validate(today).unwrap(), UserId::current()).unwrap();
//!
//! // RSVP and search
//! store.toggle_rsvp(&event.id, &UserId::from("u1")).unwrap();
//! let found = store.filtered(&EventFilter::new().with_search("rust"));
//! ```

pub mod change;
pub mod error;
pub mod filter;
pub mod store;

pub use change::StoreChange;
pub use error::{Result, StoreError};
pub use filter::EventFilter;
pub use store::{EventStore, LoadSource, STORAGE_KEY};
