//! Error types for event store operations.

use rsvp_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur during event store operations.
///
/// Unknown event IDs are not errors; lookups and mutations report them as
/// `None`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Persistence error.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Lock poisoned (thread panicked while holding lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type alias for event store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
