//! Router configuration and server setup.

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Builds the CORS layer from the configured origins.
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Health
        .route("/api/health", get(handlers::health))
        // Events
        .route(
            "/api/events",
            get(handlers::list_events)
                .post(handlers::create_event)
                .fallback(handlers::method_not_allowed),
        )
        // Apply middleware
        .layer(cors)
        .with_state(state)
}

/// Starts the API server and runs until Ctrl-C.
pub async fn serve(state: AppState) -> Result<(), std::io::Error> {
    let addr = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down API server");
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use rsvp_models::UserId;
    use serde_json::json;

    fn make_test_state() -> AppState {
        AppState::new(ApiConfig::default().with_user(UserId::from("alice")))
            .with_today(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
    }

    fn make_server() -> TestServer {
        TestServer::new(create_router(make_test_state())).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = make_server();

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(!body["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_events() {
        let server = make_server();

        let response = server.get("/api/events").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let events = body.as_array().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["title"], "React Conference 2025");
        assert_eq!(events[0]["date"], "2025-10-15");
        assert_eq!(events[0]["createdBy"], "system");
        assert_eq!(events[0]["rsvpCount"], 150);
        assert_eq!(events[1]["category"], "Workshop");
    }

    #[tokio::test]
    async fn test_post_event() {
        let server = make_server();

        let response = server
            .post("/api/events")
            .json(&json!({
                "title": "Rust Meetup",
                "description": "Talks and pizza",
                "date": "2099-01-01",
                "location": "Berlin",
                "category": "Meetup"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body: serde_json::Value = response.json();
        assert!(body["id"].as_str().unwrap().starts_with("evt-"));
        assert_eq!(body["title"], "Rust Meetup");
        assert_eq!(body["rsvpCount"], 0);
        assert_eq!(body["createdBy"], "alice");
        assert!(body["rsvpUsers"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_event_is_not_stored() {
        let server = make_server();

        server
            .post("/api/events")
            .json(&json!({
                "title": "Rust Meetup",
                "description": "Talks and pizza",
                "date": "2099-01-01",
                "location": "Berlin"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let body: serde_json::Value = server.get("/api/events").await.json();
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_post_event_validation_errors() {
        let server = make_server();

        let response = server
            .post("/api/events")
            .json(&json!({
                "title": "   ",
                "description": "Talks",
                "date": "2020-01-01",
                "location": "Berlin"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("Title is required"));
        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["field"], "title");
        assert_eq!(fields[1]["field"], "date");
        assert_eq!(fields[1]["message"], "Date cannot be in the past");
    }

    #[tokio::test]
    async fn test_post_event_malformed_body() {
        let server = make_server();

        let response = server
            .post("/api/events")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().starts_with("bad request"));
    }

    #[tokio::test]
    async fn test_other_methods_not_allowed() {
        let server = make_server();

        for response in [
            server.put("/api/events").await,
            server.delete("/api/events").await,
            server.patch("/api/events").await,
        ] {
            response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET, POST");

            let body: serde_json::Value = response.json();
            assert_eq!(body["message"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let server = make_server();

        let response = server
            .get("/api/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
            .await;

        assert!(response.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_cors_restricted_origins() {
        let state = AppState::new(
            ApiConfig::default().with_cors_origins(vec!["http://localhost:3000".to_string()]),
        );
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .get("/api/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
            .await;
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "http://localhost:3000"
        );

        let response = server
            .get("/api/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://evil.example"))
            .await;
        assert!(!response.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = make_server();
        let response = server.get("/api/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
