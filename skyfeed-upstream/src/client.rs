//! HTTP client for the OpenSky state-vector endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use skyfeed_core::constants::{
    DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_MAX_FLIGHTS, DEFAULT_UPSTREAM_URL,
};
use skyfeed_core::error::{Result, SkyfeedError};

/// One raw state vector: a positional array of mixed-type fields.
pub type RawState = Vec<serde_json::Value>;

/// Upstream API configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Flight-state API URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum flight records assembled per snapshot
    pub max_flights: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            max_flights: DEFAULT_MAX_FLIGHTS,
        }
    }
}

impl UpstreamConfig {
    /// Creates a configuration with the given endpoint URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the per-snapshot record limit.
    pub fn limit(mut self, max_flights: usize) -> Self {
        self.max_flights = max_flights;
        self
    }
}

/// Response shape of the state-vector endpoint.
#[derive(Debug, Deserialize)]
struct StatesResponse {
    states: Option<Vec<RawState>>,
}

/// Client for the OpenSky `states/all` endpoint.
pub struct OpenSkyClient {
    config: UpstreamConfig,
    http_client: reqwest::Client,
}

impl OpenSkyClient {
    /// Creates a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(UpstreamConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: UpstreamConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Fetches the current raw state vectors.
    ///
    /// # Errors
    ///
    /// - [`SkyfeedError::UpstreamUnavailable`] on transport error or timeout
    /// - [`SkyfeedError::UpstreamStatus`] on a non-success response
    /// - [`SkyfeedError::MalformedUpstream`] when the body is not JSON or
    ///   lacks the `states` field
    #[instrument(skip(self), fields(url = %self.config.url))]
    pub async fn fetch_states(&self) -> Result<Vec<RawState>> {
        let response = self
            .http_client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| SkyfeedError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkyfeedError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body: StatesResponse = response
            .json()
            .await
            .map_err(|e| SkyfeedError::MalformedUpstream(e.to_string()))?;

        let states = body.states.ok_or_else(|| {
            SkyfeedError::MalformedUpstream("response lacks 'states' field".into())
        })?;

        debug!(states = states.len(), "Fetched state vectors");
        Ok(states)
    }
}

impl Default for OpenSkyClient {
    fn default() -> Self {
        Self::new()
    }
}
