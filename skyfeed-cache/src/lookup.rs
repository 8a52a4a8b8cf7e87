//! Bounded LRU cache over a type source.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use skyfeed_core::constants::{DEFAULT_LOOKUP_CAPACITY, UNKNOWN_TYPE};
use skyfeed_core::traits::TypeSource;
use skyfeed_core::types::Icao24;

/// Bounded type lookup cache.
///
/// Wraps a [`TypeSource`] behind a least-recently-used cache so repeated
/// lookups for the same identifier are O(1) after first resolution. The
/// `"Unknown"` result of a miss is cached too, so repeated misses never
/// re-hit the backing source. Entries are write-once-per-key: the backing
/// table is immutable, so re-resolution always yields the same value.
///
/// [`resolve`](Self::resolve) never fails — an invalid or unresolvable
/// identifier yields the `"Unknown"` sentinel.
pub struct TypeCache {
    source: Arc<dyn TypeSource>,
    entries: Mutex<LruCache<String, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TypeCache {
    /// Creates a cache with the default capacity bound.
    pub fn new(source: Arc<dyn TypeSource>) -> Self {
        Self::with_capacity(source, DEFAULT_LOOKUP_CAPACITY)
    }

    /// Creates a cache with a custom capacity bound.
    pub fn with_capacity(source: Arc<dyn TypeSource>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity >= 1");
        Self {
            source,
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Resolves an aircraft identifier to a type code.
    ///
    /// Input is canonicalized (trimmed, lowercased). Invalid identifiers
    /// resolve to `"Unknown"` without touching the cache or the source.
    pub fn resolve(&self, raw: &str) -> String {
        let Some(icao) = Icao24::new(raw) else {
            debug!(raw, "Unresolvable identifier");
            return UNKNOWN_TYPE.into();
        };

        if let Some(cached) = self.entries.lock().get(icao.as_str()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return cached.clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        // Source lookup runs outside the lock: a scan-backed source may do
        // real I/O here, and concurrent misses on the same key are allowed
        // to race — they converge to one cached value.
        let resolved = self
            .source
            .lookup(&icao)
            .unwrap_or_else(|| UNKNOWN_TYPE.into());

        self.entries
            .lock()
            .put(icao.as_str().to_string(), resolved.clone());
        resolved
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> LookupStats {
        let entries = self.entries.lock();
        LookupStats {
            entries: entries.len(),
            capacity: entries.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Lookup cache statistics.
#[derive(Clone, Copy, Debug)]
pub struct LookupStats {
    /// Cached entries
    pub entries: usize,
    /// Capacity bound
    pub capacity: usize,
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that hit the backing source
    pub misses: u64,
}
