//! Flight record assembly: raw state vectors merged with type lookups.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use skyfeed_cache::TypeCache;
use skyfeed_core::constants::MISSING_FIELD;
use skyfeed_core::error::Result;
use skyfeed_core::traits::SnapshotSource;
use skyfeed_core::types::{FlightRecord, FlightSnapshot, Icao24};

use crate::client::{OpenSkyClient, RawState};

// Positional field order of the OpenSky REST API. Longitude precedes
// latitude in the state vector; earlier iterations of this service disagreed
// and this mapping is the documented one.
const IDX_ICAO24: usize = 0;
const IDX_CALLSIGN: usize = 1;
const IDX_ORIGIN_COUNTRY: usize = 2;
const IDX_LONGITUDE: usize = 5;
const IDX_LATITUDE: usize = 6;
const IDX_BARO_ALTITUDE: usize = 7;
const IDX_VELOCITY: usize = 9;
const IDX_HEADING: usize = 10;

/// Upstream state fetcher: pulls raw state vectors and assembles enriched
/// [`FlightRecord`]s.
///
/// Pure and retryable; the only side effect of a fetch is population of the
/// type lookup cache.
pub struct FlightFeed {
    client: OpenSkyClient,
    types: Arc<TypeCache>,
}

impl FlightFeed {
    /// Creates a feed over the given client and type cache.
    pub fn new(client: OpenSkyClient, types: Arc<TypeCache>) -> Self {
        Self { client, types }
    }

    /// Maps one raw state vector into a flight record.
    ///
    /// Missing or null positional fields take documented defaults (`"N/A"`
    /// for strings, `0.0` for numbers) instead of propagating absence.
    fn assemble(&self, state: &RawState) -> FlightRecord {
        let raw_icao = string_at(state, IDX_ICAO24).unwrap_or_default();
        let icao24 = Icao24::new(raw_icao)
            .map(|i| i.as_str().to_string())
            .unwrap_or_else(|| raw_icao.trim().to_lowercase());

        let callsign = string_at(state, IDX_CALLSIGN)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING_FIELD)
            .to_string();

        let origin_country = string_at(state, IDX_ORIGIN_COUNTRY)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING_FIELD)
            .to_string();

        FlightRecord {
            aircraft_type: self.types.resolve(raw_icao),
            icao24,
            callsign,
            origin_country,
            latitude: number_at(state, IDX_LATITUDE),
            longitude: number_at(state, IDX_LONGITUDE),
            baro_altitude: number_at(state, IDX_BARO_ALTITUDE),
            velocity: number_at(state, IDX_VELOCITY),
            heading: number_at(state, IDX_HEADING),
        }
    }
}

#[async_trait]
impl SnapshotSource for FlightFeed {
    #[instrument(skip(self))]
    async fn fetch_snapshot(&self) -> Result<FlightSnapshot> {
        let states = self.client.fetch_states().await?;
        let limit = self.client.config().max_flights;

        let flights: Vec<FlightRecord> = states
            .iter()
            .take(limit)
            .map(|state| self.assemble(state))
            .collect();

        debug!(flights = flights.len(), limit, "Assembled flight snapshot");
        Ok(FlightSnapshot::new(flights))
    }
}

fn string_at(state: &RawState, idx: usize) -> Option<&str> {
    state.get(idx).and_then(|v| v.as_str())
}

fn number_at(state: &RawState, idx: usize) -> f64 {
    state.get(idx).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::UpstreamConfig;

    use skyfeed_core::traits::TypeSource;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedTypes;

    impl TypeSource for FixedTypes {
        fn lookup(&self, icao: &Icao24) -> Option<String> {
            (icao.as_str() == "abc123").then(|| "A320".to_string())
        }
    }

    fn test_types() -> Arc<TypeCache> {
        Arc::new(TypeCache::new(Arc::new(FixedTypes)))
    }

    async fn feed_for(server: &MockServer, limit: usize) -> FlightFeed {
        let config =
            UpstreamConfig::with_url(format!("{}/api/states/all", server.uri())).limit(limit);
        FlightFeed::new(OpenSkyClient::with_config(config), test_types())
    }

    async fn mock_states(server: &MockServer, states: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/states/all"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "time": 1_700_000_000, "states": states })),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_end_to_end_assembly() {
        let server = MockServer::start().await;
        mock_states(
            &server,
            serde_json::json!([[
                "abc123", "UAL123  ", "United States", 1_700_000_000, 1_700_000_000,
                8.5492, 47.4515, 11277.6, false, 250.5, 96.2
            ]]),
        )
        .await;

        let snapshot = feed_for(&server, 50).await.fetch_snapshot().await.unwrap();

        assert_eq!(snapshot.len(), 1);
        let record = &snapshot.flights[0];
        assert_eq!(record.icao24, "abc123");
        assert_eq!(record.callsign, "UAL123");
        assert_eq!(record.origin_country, "United States");
        assert_eq!(record.longitude, 8.5492);
        assert_eq!(record.latitude, 47.4515);
        assert_eq!(record.baro_altitude, 11277.6);
        assert_eq!(record.velocity, 250.5);
        assert_eq!(record.heading, 96.2);
        assert_eq!(record.aircraft_type, "A320");
    }

    #[tokio::test]
    async fn test_null_fields_take_defaults() {
        let server = MockServer::start().await;
        mock_states(
            &server,
            serde_json::json!([[
                "ffffff", null, null, null, null, null, null, null, null, null, null
            ]]),
        )
        .await;

        let snapshot = feed_for(&server, 50).await.fetch_snapshot().await.unwrap();

        let record = &snapshot.flights[0];
        assert_eq!(record.callsign, "N/A");
        assert_eq!(record.origin_country, "N/A");
        assert_eq!(record.latitude, 0.0);
        assert_eq!(record.longitude, 0.0);
        assert_eq!(record.velocity, 0.0);
        assert_eq!(record.aircraft_type, "Unknown");
    }

    #[tokio::test]
    async fn test_short_state_vector_takes_defaults() {
        let server = MockServer::start().await;
        mock_states(&server, serde_json::json!([["abc123", "UAL1"]])).await;

        let snapshot = feed_for(&server, 50).await.fetch_snapshot().await.unwrap();

        let record = &snapshot.flights[0];
        assert_eq!(record.callsign, "UAL1");
        assert_eq!(record.heading, 0.0);
        assert_eq!(record.aircraft_type, "A320");
    }

    #[tokio::test]
    async fn test_record_limit_is_applied() {
        let server = MockServer::start().await;
        mock_states(
            &server,
            serde_json::json!([["abc123"], ["def456"], ["aaa111"]]),
        )
        .await;

        let snapshot = feed_for(&server, 2).await.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
    }

    #[tokio::test]
    async fn test_upstream_order_preserved() {
        let server = MockServer::start().await;
        mock_states(
            &server,
            serde_json::json!([["abc123", "FIRST"], ["def456", "SECOND"]]),
        )
        .await;

        let snapshot = feed_for(&server, 50).await.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.flights[0].callsign, "FIRST");
        assert_eq!(snapshot.flights[1].callsign, "SECOND");
    }
}
