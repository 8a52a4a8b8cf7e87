//! Owned, swappable reference dataset.
//!
//! Wraps the download step and the indexed table behind one component with a
//! defined lifecycle: constructed at startup, loaded before the server
//! accepts requests, and refreshed only as an explicit rebuild-and-swap.

use parking_lot::RwLock;
use tracing::{info, instrument, warn};

use skyfeed_core::error::Result;
use skyfeed_core::traits::TypeSource;
use skyfeed_core::types::Icao24;

use crate::download::{ensure_available, DatasetConfig};
use crate::table::TypeTable;

/// Reference dataset with an explicit load lifecycle.
///
/// Until the first successful [`load`](Self::load), every lookup returns
/// `None` and identifiers resolve to `"Unknown"` — a failed startup load
/// degrades the service instead of crashing it.
///
/// Refresh is rebuild-and-swap: a new table is built off to the side and
/// atomically replaces the shared reference; readers mid-lookup finish
/// against the old table.
pub struct ReferenceDataset {
    config: DatasetConfig,
    table: RwLock<Option<TypeTable>>,
}

impl ReferenceDataset {
    /// Creates an unloaded dataset with the given configuration.
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            table: RwLock::new(None),
        }
    }

    /// Ensures the local copy exists, builds the lookup table, and swaps it
    /// in. On failure the previously loaded table (if any) stays in place.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<()> {
        let path = ensure_available(&self.config).await?;

        let table = match TypeTable::load(&path) {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Reference dataset load failed; keeping previous table");
                return Err(e);
            }
        };

        info!(entries = table.len(), "Reference dataset ready");
        *self.table.write() = Some(table);
        Ok(())
    }

    /// Returns true if a table has been loaded.
    pub fn is_ready(&self) -> bool {
        self.table.read().is_some()
    }

    /// Number of indexed identifiers, 0 when unloaded.
    pub fn len(&self) -> usize {
        self.table.read().as_ref().map_or(0, TypeTable::len)
    }

    /// Returns true when no table is loaded or the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dataset configuration.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }
}

impl TypeSource for ReferenceDataset {
    fn lookup(&self, icao: &Icao24) -> Option<String> {
        self.table.read().as_ref().and_then(|t| t.lookup(icao))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_unloaded_dataset_resolves_nothing() {
        let dataset = ReferenceDataset::new(DatasetConfig::default());
        assert!(!dataset.is_ready());
        assert_eq!(dataset.lookup(&Icao24::new("abc123").unwrap()), None);
    }

    #[tokio::test]
    async fn test_load_from_local_copy() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("db.csv");
        std::fs::write(&local, "icao24,typecode\nabc123,A320\n").unwrap();

        let dataset =
            ReferenceDataset::new(DatasetConfig::with_url("http://127.0.0.1:1/x").at_path(&local));
        dataset.load().await.unwrap();

        assert!(dataset.is_ready());
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.lookup(&Icao24::new("ABC123").unwrap()),
            Some("A320".into())
        );
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_table() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("db.csv");
        std::fs::write(&local, "icao24,typecode\nabc123,A320\n").unwrap();

        let dataset =
            ReferenceDataset::new(DatasetConfig::with_url("http://127.0.0.1:1/x").at_path(&local));
        dataset.load().await.unwrap();

        // Corrupt the file: reload fails structurally, old table survives
        std::fs::write(&local, "no header here\n").unwrap();
        assert!(dataset.load().await.is_err());

        assert!(dataset.is_ready());
        assert_eq!(
            dataset.lookup(&Icao24::new("abc123").unwrap()),
            Some("A320".into())
        );
    }
}
