//! Time-windowed flight snapshot cache with single-flight refresh.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use skyfeed_core::constants::DEFAULT_SNAPSHOT_TTL_SECONDS;
use skyfeed_core::error::{Result, SkyfeedError};
use skyfeed_core::traits::SnapshotSource;
use skyfeed_core::types::FlightSnapshot;

/// A stored snapshot with its process-local fetch instant.
struct Stored {
    snapshot: Arc<FlightSnapshot>,
    fetched_at: Instant,
}

/// Bookkeeping for the single-flight refresh section.
///
/// `last_attempt` marks the start of the current refresh window; a failed
/// attempt records its error so callers racing the same window share the
/// outcome instead of issuing redundant upstream calls.
struct RefreshState {
    last_attempt: Option<Instant>,
    last_failure: Option<String>,
}

/// Memoizes the merged flight list for a fixed validity window.
///
/// The defining trade of the whole service: strict freshness is given up for
/// availability and upstream-load reduction.
///
/// - Within the window, every caller gets the same [`FlightSnapshot`] with no
///   upstream call.
/// - Past the window, exactly one caller refreshes; concurrent callers either
///   wait for its result or are served the previous (stale) snapshot
///   immediately, so a stalled upstream call never blocks serving.
/// - A failed refresh falls back to the previous snapshot when one exists;
///   the error reaches the caller only on a first-ever fetch.
pub struct SnapshotCache {
    source: Arc<dyn SnapshotSource>,
    ttl: Duration,
    current: RwLock<Option<Stored>>,
    refresh: Mutex<RefreshState>,
}

impl SnapshotCache {
    /// Creates a cache with the default validity window.
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self::with_ttl(source, Duration::from_secs(DEFAULT_SNAPSHOT_TTL_SECONDS))
    }

    /// Creates a cache with a custom validity window.
    pub fn with_ttl(source: Arc<dyn SnapshotSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            current: RwLock::new(None),
            refresh: Mutex::new(RefreshState {
                last_attempt: None,
                last_failure: None,
            }),
        }
    }

    /// Returns the current snapshot, refreshing it when the window expired.
    ///
    /// # Errors
    ///
    /// Propagates the upstream error only when no previous snapshot exists to
    /// fall back on.
    pub async fn get_or_refresh(&self) -> Result<Arc<FlightSnapshot>> {
        if let Some(snapshot) = self.fresh() {
            debug!("Serving fresh snapshot");
            return Ok(snapshot);
        }

        let mut state = match self.refresh.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                // A refresh is in flight. Serve the previous snapshot rather
                // than queueing behind a possibly stalled upstream call.
                if let Some(snapshot) = self.stored() {
                    debug!("Refresh in flight; serving previous snapshot");
                    return Ok(snapshot);
                }
                self.refresh.lock().await
            }
        };

        // Double-check: the refresh we waited behind may have finished.
        if let Some(snapshot) = self.fresh() {
            return Ok(snapshot);
        }

        // One attempt per window, even under failure: callers racing the same
        // expired window share the recorded outcome.
        if let Some(at) = state.last_attempt {
            if at.elapsed() < self.ttl {
                if let Some(snapshot) = self.stored() {
                    return Ok(snapshot);
                }
                let reason = state.last_failure.clone().unwrap_or_default();
                return Err(SkyfeedError::UpstreamUnavailable(reason));
            }
        }
        state.last_attempt = Some(Instant::now());

        match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                state.last_failure = None;
                let snapshot = Arc::new(snapshot);
                *self.current.write() = Some(Stored {
                    snapshot: snapshot.clone(),
                    fetched_at: Instant::now(),
                });
                info!(flights = snapshot.len(), "Snapshot refreshed");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "Snapshot refresh failed");
                state.last_failure = Some(e.to_string());
                match self.stored() {
                    Some(snapshot) => {
                        info!("Serving stale snapshot after failed refresh");
                        Ok(snapshot)
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Returns the validity window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Age of the stored snapshot, if any.
    pub fn age(&self) -> Option<Duration> {
        self.current.read().as_ref().map(|s| s.fetched_at.elapsed())
    }

    /// Drops the stored snapshot; the next call refreshes unconditionally.
    pub fn invalidate(&self) {
        *self.current.write() = None;
        if let Ok(mut state) = self.refresh.try_lock() {
            state.last_attempt = None;
            state.last_failure = None;
        }
    }

    fn fresh(&self) -> Option<Arc<FlightSnapshot>> {
        let current = self.current.read();
        current
            .as_ref()
            .filter(|s| s.fetched_at.elapsed() < self.ttl)
            .map(|s| s.snapshot.clone())
    }

    fn stored(&self) -> Option<Arc<FlightSnapshot>> {
        self.current.read().as_ref().map(|s| s.snapshot.clone())
    }
}
