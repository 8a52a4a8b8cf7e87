//! App state: reference dataset, lookup cache, snapshot cache, config.

use std::sync::Arc;
use std::time::Duration;

use skyfeed_cache::{SnapshotCache, TypeCache};
use skyfeed_core::constants::{
    DEFAULT_DATASET_PATH, DEFAULT_DATASET_URL, DEFAULT_LOOKUP_CAPACITY, DEFAULT_MAX_FLIGHTS,
    DEFAULT_PORT, DEFAULT_SNAPSHOT_TTL_SECONDS, DEFAULT_UPSTREAM_URL,
};
use skyfeed_core::traits::SnapshotSource;
use skyfeed_reference::{DatasetConfig, ReferenceDataset};
use skyfeed_upstream::{FlightFeed, OpenSkyClient, UpstreamConfig};

/// Server configuration, all values falling back to documented defaults.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,
    /// Remote reference dataset URL
    pub dataset_url: String,
    /// Local reference dataset path
    pub dataset_path: String,
    /// Flight-state API URL
    pub upstream_url: String,
    /// Snapshot validity window in seconds
    pub snapshot_ttl_seconds: u64,
    /// Type lookup cache capacity
    pub lookup_capacity: usize,
    /// Maximum flight records per snapshot
    pub max_flights: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dataset_url: DEFAULT_DATASET_URL.into(),
            dataset_path: DEFAULT_DATASET_PATH.into(),
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            snapshot_ttl_seconds: DEFAULT_SNAPSHOT_TTL_SECONDS,
            lookup_capacity: DEFAULT_LOOKUP_CAPACITY,
            max_flights: DEFAULT_MAX_FLIGHTS,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for unset values.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Self {
            port: env_parsed("PORT", defaults.port),
            dataset_url: env_string("SKYFEED_DATASET_URL", defaults.dataset_url),
            dataset_path: env_string("SKYFEED_DATASET_PATH", defaults.dataset_path),
            upstream_url: env_string("SKYFEED_UPSTREAM_URL", defaults.upstream_url),
            snapshot_ttl_seconds: env_parsed(
                "SKYFEED_SNAPSHOT_TTL_SECONDS",
                defaults.snapshot_ttl_seconds,
            ),
            lookup_capacity: env_parsed("SKYFEED_LOOKUP_CAPACITY", defaults.lookup_capacity),
            max_flights: env_parsed("SKYFEED_MAX_FLIGHTS", defaults.max_flights),
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Shared application state, constructed once at startup and passed to every
/// request handler.
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Owned reference dataset (loaded before serving)
    pub reference: Arc<ReferenceDataset>,
    /// Bounded type lookup cache over the dataset
    pub types: Arc<TypeCache>,
    /// Time-windowed snapshot cache over the upstream fetcher
    pub snapshots: SnapshotCache,
}

impl AppState {
    /// Builds the full component graph for the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        let reference = Arc::new(ReferenceDataset::new(
            DatasetConfig::with_url(&config.dataset_url).at_path(&config.dataset_path),
        ));
        let types = Arc::new(TypeCache::with_capacity(
            reference.clone(),
            config.lookup_capacity,
        ));

        let client = OpenSkyClient::with_config(
            UpstreamConfig::with_url(&config.upstream_url).limit(config.max_flights),
        );
        let feed = Arc::new(FlightFeed::new(client, types.clone()));
        let snapshots =
            SnapshotCache::with_ttl(feed, Duration::from_secs(config.snapshot_ttl_seconds));

        Self {
            config,
            reference,
            types,
            snapshots,
        }
    }

    /// Builds the state around an injected snapshot source.
    ///
    /// This is the seam that lets the caching policy be tested without a live
    /// upstream.
    pub fn with_source(config: ApiConfig, source: Arc<dyn SnapshotSource>) -> Self {
        let reference = Arc::new(ReferenceDataset::new(
            DatasetConfig::with_url(&config.dataset_url).at_path(&config.dataset_path),
        ));
        let types = Arc::new(TypeCache::with_capacity(
            reference.clone(),
            config.lookup_capacity,
        ));
        let snapshots =
            SnapshotCache::with_ttl(source, Duration::from_secs(config.snapshot_ttl_seconds));

        Self {
            config,
            reference,
            types,
            snapshots,
        }
    }
}
