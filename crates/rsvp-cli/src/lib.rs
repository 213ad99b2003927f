//! RSVP tracker command line.
//!
//! This crate provides the `rsvp` binary: listing and searching events,
//! creating and editing your own, RSVP'ing, and serving the mock API.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
