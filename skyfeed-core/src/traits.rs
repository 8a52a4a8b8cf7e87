//! Common traits for skyfeed.
//!
//! These traits define the seams between the lookup, cache, and fetch layers,
//! enabling alternative backends and isolated testing of the caching policy
//! without standing up the HTTP layer.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FlightSnapshot, Icao24};

// ═══════════════════════════════════════════════════════════════════════════════
// TYPE SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for resolving an aircraft identifier to a raw type code.
///
/// Implementations might use:
/// - An in-memory indexed table built once at startup (the recommended path)
/// - A per-call scan of the dataset file (slow; pair with a lookup cache)
///
/// A `None` return means the identifier is absent from the dataset; callers
/// translate absence into the `"Unknown"` sentinel. Lookups never fail:
/// backend trouble degrades to `None`.
pub trait TypeSource: Send + Sync {
    /// Looks up the type code for a canonical identifier.
    fn lookup(&self, icao: &Icao24) -> Option<String>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// SNAPSHOT SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for producing a fresh flight snapshot from the upstream API.
///
/// Implemented by the OpenSky-backed fetcher; mocked in cache and API tests.
/// The operation is pure and retryable — its only side effect is populating
/// the type lookup cache.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches the current state vectors and assembles a snapshot.
    async fn fetch_snapshot(&self) -> Result<FlightSnapshot>;
}
