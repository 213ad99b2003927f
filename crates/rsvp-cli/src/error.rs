//! Error type for CLI commands.

use rsvp_models::ValidationErrors;
use rsvp_store::StoreError;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Store error.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The form failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// No event with the given ID.
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// The event belongs to someone else.
    #[error("Only the creator can change this event: {0}")]
    NotOwner(String),

    /// The command needs more than an open store.
    #[error("'{0}' can't run against an event store")]
    NotAStoreCommand(&'static str),

    /// The event is over and can no longer be RSVP'd to.
    #[error("Event has already ended: {0}")]
    EventEnded(String),

    /// Terminal or network I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, CliError>;
