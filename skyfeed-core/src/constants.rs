//! Defaults and sentinels for skyfeed.
//!
//! Every externally configurable value has a documented default here so the
//! service runs with zero configuration.

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default OpenSky state-vector endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://opensky-network.org/api/states/all";

/// Default remote location of the aircraft metadata CSV.
pub const DEFAULT_DATASET_URL: &str =
    "https://opensky-network.org/datasets/metadata/aircraftDatabase.csv";

/// Default local path for the downloaded reference dataset.
pub const DEFAULT_DATASET_PATH: &str = "aircraftDatabase.csv";

// ═══════════════════════════════════════════════════════════════════════════════
// TIME WINDOWS & LIMITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Validity window of a flight snapshot, in seconds.
///
/// Requests within this window are served from memory without touching the
/// upstream API.
pub const DEFAULT_SNAPSHOT_TTL_SECONDS: u64 = 10;

/// Request timeout for upstream HTTP calls, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of flight records assembled per snapshot.
pub const DEFAULT_MAX_FLIGHTS: usize = 50;

/// Capacity bound of the type lookup cache.
pub const DEFAULT_LOOKUP_CAPACITY: usize = 50_000;

// ═══════════════════════════════════════════════════════════════════════════════
// SENTINELS
// ═══════════════════════════════════════════════════════════════════════════════

/// Type code returned for any identifier that cannot be resolved.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Placeholder for absent upstream string fields (callsign, country).
pub const MISSING_FIELD: &str = "N/A";

/// Length of an ICAO 24-bit address rendered as hex.
pub const ICAO24_HEX_LEN: usize = 6;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3000;
