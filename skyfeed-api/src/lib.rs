//! # Skyfeed API Server
//!
//! REST surface for the flight proxy.
//!
//! ## Endpoints
//!
//! - `GET /flights` - Merged, cached flight list (JSON array)
//! - `GET /health` - Liveness and dataset readiness
//!
//! ## Response fields
//!
//! Each flight object carries `icao24`, `callsign`, `origin_country`,
//! `latitude`, `longitude`, `baro_altitude`, `velocity`, `heading`, and
//! `type` (the resolved aircraft type designator).
//!
//! ## Example
//!
//! ```rust,ignore
//! use skyfeed_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config);
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{ApiConfig, AppState};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// API server for skyfeed.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    ///
    /// The reference dataset is loaded before the listener starts accepting.
    /// A failed load degrades the service (every type resolves to "Unknown")
    /// instead of refusing to start.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        if let Err(e) = self.state.reference.load().await {
            warn!(error = %e, "Reference dataset unavailable; serving with unresolved types");
        }

        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("skyfeed API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with environment-derived configuration.
pub async fn start_server(port: u16) -> std::io::Result<()> {
    let config = ApiConfig::from_env();
    let server = ApiServer::new(config);
    server.run(([0, 0, 0, 0], port)).await
}
