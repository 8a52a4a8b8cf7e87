//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // The merged, cached flight list
        .route("/flights", get(handlers::list_flights))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ApiConfig;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use skyfeed_core::error::{Result, SkyfeedError};
    use skyfeed_core::traits::SnapshotSource;
    use skyfeed_core::types::{FlightRecord, FlightSnapshot};

    struct StubFeed {
        failing: bool,
    }

    #[async_trait]
    impl SnapshotSource for StubFeed {
        async fn fetch_snapshot(&self) -> Result<FlightSnapshot> {
            if self.failing {
                return Err(SkyfeedError::UpstreamUnavailable("stub down".into()));
            }
            Ok(FlightSnapshot::new(vec![FlightRecord {
                icao24: "abc123".into(),
                callsign: "UAL123".into(),
                aircraft_type: "A320".into(),
                ..Default::default()
            }]))
        }
    }

    fn test_app(failing: bool) -> Router {
        let state = Arc::new(AppState::with_source(
            ApiConfig::default(),
            Arc::new(StubFeed { failing }),
        ));
        create_router(state)
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(
            axum::http::Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = get_response(test_app(false), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["dataset_ready"], false);
    }

    #[tokio::test]
    async fn test_flights_returns_json_array() {
        let response = get_response(test_app(false), "/flights").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let flights = body.as_array().unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0]["callsign"], "UAL123");
        assert_eq!(flights[0]["type"], "A320");
        assert_eq!(flights[0]["icao24"], "abc123");
        assert_eq!(flights[0]["latitude"], 0.0);
    }

    #[tokio::test]
    async fn test_flights_upstream_failure_without_cache_is_500() {
        let response = get_response(test_app(true), "/flights").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_flights_served_from_cache_within_window() {
        let app = test_app(false);

        let first = json_body(get_response(app.clone(), "/flights").await).await;
        let second = json_body(get_response(app, "/flights").await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = get_response(test_app(false), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
