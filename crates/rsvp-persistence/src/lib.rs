//! Persistence layer for the RSVP tracker.
//!
//! State is kept in a small key/value [`Storage`], the desktop analogue of
//! browser local storage. [`FileStorage`] keeps one file per key and writes
//! it atomically (write to temp file, then rename); [`MemoryStorage`] keeps
//! everything in memory.
//!
//! # Example
//!
//! ```no_run
//! use rsvp_persistence::{FileStorage, Storage};
//!
//! let storage = FileStorage::new("/home/user/.rsvp-tracker");
//!
//! storage.set_item("events", "[]").unwrap();
//! let raw = storage.get_item("events").unwrap();
//! assert_eq!(raw.as_deref(), Some("[]"));
//! ```

pub mod atomic;
pub mod error;
pub mod storage;

pub use error::{PersistenceError, Result};
pub use storage::{read_json, write_json, FileStorage, MemoryStorage, Storage};
