//! API route handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use crate::dto::{flights_response, FlightDto, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        dataset_ready: state.reference.is_ready(),
        dataset_entries: state.reference.len(),
        snapshot_age_seconds: state.snapshots.age().map(|age| age.as_secs()),
    })
}

/// GET /flights
///
/// Serves the merged, cached flight list. A refresh happens at most once per
/// validity window; an upstream failure surfaces here only when no previous
/// snapshot exists to fall back on.
pub async fn list_flights(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FlightDto>>> {
    let snapshot = state.snapshots.get_or_refresh().await?;

    debug!(
        flights = snapshot.len(),
        fetched_at = %snapshot.fetched_at,
        "Serving flight list"
    );

    Ok(Json(flights_response(&snapshot)))
}
