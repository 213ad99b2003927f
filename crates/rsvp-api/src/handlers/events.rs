//! Event handlers for the mock `/api/events` endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use rsvp_models::{fixtures, Event, EventForm};

use crate::error::Result;
use crate::state::AppState;
use crate::types::MessageResponse;

/// Methods served on `/api/events`, as listed in the `Allow` header.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// GET /api/events - List the static fixture events.
pub async fn list_events() -> Json<Vec<Event>> {
    let events = fixtures::mock_api_events();
    debug!(count = events.len(), "Serving mock events");
    Json(events)
}

/// POST /api/events - Validate a form and return the event it describes.
///
/// The event gets a fresh ID and no attendees, and is created by the
/// configured user. Nothing is stored.
pub async fn create_event(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EventForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>)> {
    let Json(form) = payload?;
    let draft = form.validate(state.today())?;
    let event = Event::new(draft, state.config.user.clone());

    info!(event_id = %event.id, title = %event.title, "Created mock event");

    Ok((StatusCode::CREATED, Json(event)))
}

/// Any other method on /api/events.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        Json(MessageResponse::new("Method not allowed")),
    )
        .into_response()
}
