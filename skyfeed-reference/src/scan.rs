//! Per-call dataset scan backend.
//!
//! Re-reads the reference CSV on every lookup instead of holding an index in
//! memory. First resolution of an identifier pays the full scan cost; the
//! bounded lookup cache in `skyfeed-cache` is what makes repeated calls O(1).

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use skyfeed_core::traits::TypeSource;
use skyfeed_core::types::Icao24;

/// Scan-per-lookup type source.
///
/// Holds only the dataset path. Concurrent lookups each open the file
/// independently; redundant scans of the same key converge to one cached
/// value once the lookup cache stores the result.
#[derive(Clone, Debug)]
pub struct ScanLookup {
    path: PathBuf,
}

impl ScanLookup {
    /// Creates a scan backend over the given dataset file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the dataset path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scan(&self, target: &Icao24) -> Option<String> {
        let mut reader = match csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(&self.path)
        {
            Ok(r) => r,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Dataset scan failed to open file");
                return None;
            }
        };

        let mut header: Option<(usize, usize)> = None;

        for record in reader.records() {
            let record = match record {
                Ok(r) => r,
                Err(_) => continue,
            };

            let Some((idx_icao, idx_type)) = header else {
                header = crate::table::locate_header(&record);
                continue;
            };

            let icao = record.get(idx_icao).map(crate::table::clean_field).unwrap_or_default();
            if !icao.eq_ignore_ascii_case(target.as_str()) {
                continue;
            }

            let typecode = record.get(idx_type).map(crate::table::clean_field).unwrap_or_default();
            if typecode.is_empty() || crate::table::is_unknown_sentinel(&typecode) {
                return None;
            }
            return Some(typecode);
        }

        if header.is_none() {
            warn!(path = %self.path.display(), "Dataset scan found no header row");
        }
        None
    }
}

impl TypeSource for ScanLookup {
    fn lookup(&self, icao: &Icao24) -> Option<String> {
        let found = self.scan(icao);
        debug!(icao = %icao, hit = found.is_some(), "Dataset scan lookup");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_dataset(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_scan_finds_entry() {
        let file = write_dataset(
            "icao24,typecode\n\
             abc123,A320\n\
             def456,B738\n",
        );
        let scan = ScanLookup::new(file.path());

        assert_eq!(
            scan.lookup(&Icao24::new("def456").unwrap()),
            Some("B738".into())
        );
    }

    #[test]
    fn test_scan_miss_is_none() {
        let file = write_dataset("icao24,typecode\nabc123,A320\n");
        let scan = ScanLookup::new(file.path());

        assert_eq!(scan.lookup(&Icao24::new("ffffff").unwrap()), None);
    }

    #[test]
    fn test_scan_sentinel_is_none() {
        let file = write_dataset("icao24,typecode\nabc123,unknow\n");
        let scan = ScanLookup::new(file.path());

        assert_eq!(scan.lookup(&Icao24::new("abc123").unwrap()), None);
    }

    #[test]
    fn test_scan_missing_file_degrades_to_none() {
        let scan = ScanLookup::new("/nonexistent/db.csv");
        assert_eq!(scan.lookup(&Icao24::new("abc123").unwrap()), None);
    }
}
