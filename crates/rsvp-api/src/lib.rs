//! Mock REST endpoint for the RSVP tracker.
//!
//! Serves a static list of events and echoes back newly created ones without
//! storing them:
//! - `GET /api/events` returns the fixture events
//! - `POST /api/events` validates a form and returns the created record
//! - any other method on `/api/events` is rejected with `405`
//! - `GET /api/health` reports status and uptime
//!
//! # Example
//!
//! ```no_run
//! use rsvp_api::{serve, ApiConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::new(ApiConfig::default());
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::{ApiConfig, DEFAULT_PORT};
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
