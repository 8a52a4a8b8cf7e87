//! DTOs for API responses.

use serde::Serialize;

use skyfeed_core::types::{FlightRecord, FlightSnapshot};

/// One flight in the `/flights` response.
#[derive(Debug, Serialize)]
pub struct FlightDto {
    /// Transponder address (lowercase hex)
    pub icao24: String,
    /// Trimmed callsign, `"N/A"` when absent upstream
    pub callsign: String,
    /// Country of registration
    pub origin_country: String,
    /// WGS-84 latitude
    pub latitude: f64,
    /// WGS-84 longitude
    pub longitude: f64,
    /// Barometric altitude in meters
    pub baro_altitude: f64,
    /// Ground speed in m/s
    pub velocity: f64,
    /// True track in degrees
    pub heading: f64,
    /// Resolved aircraft type designator, `"Unknown"` when unresolved
    #[serde(rename = "type")]
    pub aircraft_type: String,
}

impl From<&FlightRecord> for FlightDto {
    fn from(record: &FlightRecord) -> Self {
        Self {
            icao24: record.icao24.clone(),
            callsign: record.callsign.clone(),
            origin_country: record.origin_country.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            baro_altitude: record.baro_altitude,
            velocity: record.velocity,
            heading: record.heading,
            aircraft_type: record.aircraft_type.clone(),
        }
    }
}

/// Maps a snapshot into the response array.
pub fn flights_response(snapshot: &FlightSnapshot) -> Vec<FlightDto> {
    snapshot.flights.iter().map(FlightDto::from).collect()
}

/// Response for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process serves
    pub status: &'static str,
    /// Whether the reference dataset has loaded
    pub dataset_ready: bool,
    /// Indexed identifiers in the dataset
    pub dataset_entries: usize,
    /// Age of the cached snapshot in seconds, absent before the first fetch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_age_seconds: Option<u64>,
}
