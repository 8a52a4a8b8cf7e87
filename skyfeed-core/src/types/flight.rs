//! Flight record and snapshot types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MISSING_FIELD, UNKNOWN_TYPE};

/// One observed aircraft state, enriched with a resolved type code.
///
/// Every field has a documented default so absent upstream values never
/// propagate as nulls into the response: strings default to `"N/A"`, numbers
/// to `0.0`, and the type code to `"Unknown"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Transponder address in lowercase hex, empty when the upstream record
    /// carried none.
    pub icao24: String,
    /// Trimmed callsign.
    pub callsign: String,
    /// Country of registration.
    pub origin_country: String,
    /// WGS-84 latitude in decimal degrees.
    pub latitude: f64,
    /// WGS-84 longitude in decimal degrees.
    pub longitude: f64,
    /// Barometric altitude in meters.
    pub baro_altitude: f64,
    /// Ground speed in m/s.
    pub velocity: f64,
    /// True track in decimal degrees clockwise from north.
    pub heading: f64,
    /// Aircraft type designator (e.g. "A320"), `"Unknown"` when unresolved.
    #[serde(rename = "type")]
    pub aircraft_type: String,
}

impl Default for FlightRecord {
    fn default() -> Self {
        Self {
            icao24: String::new(),
            callsign: MISSING_FIELD.into(),
            origin_country: MISSING_FIELD.into(),
            latitude: 0.0,
            longitude: 0.0,
            baro_altitude: 0.0,
            velocity: 0.0,
            heading: 0.0,
            aircraft_type: UNKNOWN_TYPE.into(),
        }
    }
}

/// The full ordered sequence of flight records produced by one successful
/// upstream fetch.
///
/// Treated as an immutable unit: created on a cache miss, shared by all
/// concurrent requests within its validity window, and replaced wholesale on
/// the next successful fetch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlightSnapshot {
    /// Ordered flight records, upstream order preserved.
    pub flights: Vec<FlightRecord>,
    /// When the upstream fetch completed.
    pub fetched_at: DateTime<Utc>,
}

impl FlightSnapshot {
    /// Creates a snapshot stamped with the current time.
    pub fn new(flights: Vec<FlightRecord>) -> Self {
        Self {
            flights,
            fetched_at: Utc::now(),
        }
    }

    /// Number of flight records in the snapshot.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Returns true if the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record = FlightRecord::default();
        assert_eq!(record.callsign, "N/A");
        assert_eq!(record.origin_country, "N/A");
        assert_eq!(record.latitude, 0.0);
        assert_eq!(record.aircraft_type, "Unknown");
    }

    #[test]
    fn test_type_field_renamed_in_json() {
        let record = FlightRecord {
            aircraft_type: "A320".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "A320");
        assert!(json.get("aircraft_type").is_none());
    }

    #[test]
    fn test_snapshot_len() {
        let snapshot = FlightSnapshot::new(vec![FlightRecord::default()]);
        assert_eq!(snapshot.len(), 1);
        assert!(!snapshot.is_empty());
    }
}
