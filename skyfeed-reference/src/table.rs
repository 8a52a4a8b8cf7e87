//! In-memory indexed type lookup table.
//!
//! Built once per load from the reference CSV, immutable afterwards. Lookups
//! are plain map reads and safe to share across request handlers.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use skyfeed_core::error::{Result, SkyfeedError};
use skyfeed_core::traits::TypeSource;
use skyfeed_core::types::Icao24;

/// Column header for the aircraft identifier.
const COL_ICAO24: &str = "icao24";
/// Column header for the aircraft type designator.
const COL_TYPECODE: &str = "typecode";

/// Immutable-after-load mapping from aircraft identifier to type code.
///
/// Rows with a missing, empty, or sentinel ("unknown"/"unknow") type code are
/// excluded entirely — absence is the default, not a stored marker.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    entries: HashMap<String, String>,
}

impl TypeTable {
    /// Parses the local dataset copy into an indexed table.
    ///
    /// Malformed rows (missing identifier or type code) are skipped without
    /// aborting the load. Fails with [`SkyfeedError::DatasetUnreadable`] only
    /// when the file cannot be opened or no header row is present.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false) // Header located manually; some dumps carry leading comments
            .from_path(path)
            .map_err(|e| {
                SkyfeedError::DatasetUnreadable(format!("cannot open '{}': {}", path.display(), e))
            })?;

        let mut entries = HashMap::new();
        let mut header: Option<(usize, usize)> = None;
        let mut skipped = 0usize;

        for record in rdr_records(&mut reader) {
            let Some((idx_icao, idx_type)) = header else {
                header = locate_header(&record);
                continue;
            };

            let icao = record.get(idx_icao).map(clean_field).unwrap_or_default();
            let typecode = record.get(idx_type).map(clean_field).unwrap_or_default();

            let Some(icao) = Icao24::new(&icao) else {
                skipped += 1;
                continue;
            };
            if typecode.is_empty() || is_unknown_sentinel(&typecode) {
                skipped += 1;
                continue;
            }

            entries.insert(icao.as_str().to_string(), typecode);
        }

        if header.is_none() {
            return Err(SkyfeedError::DatasetUnreadable(format!(
                "no '{}' / '{}' header row in '{}'",
                COL_ICAO24,
                COL_TYPECODE,
                path.display()
            )));
        }

        info!(entries = entries.len(), skipped, path = %path.display(), "Type lookup table built");
        Ok(Self { entries })
    }

    /// Number of indexed identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeSource for TypeTable {
    fn lookup(&self, icao: &Icao24) -> Option<String> {
        let found = self.entries.get(icao.as_str()).cloned();
        debug!(icao = %icao, hit = found.is_some(), "Table lookup");
        found
    }
}

/// Iterates CSV records, logging and skipping rows the parser rejects.
fn rdr_records(
    reader: &mut csv::Reader<std::fs::File>,
) -> impl Iterator<Item = csv::StringRecord> + '_ {
    reader.records().filter_map(|r| match r {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "Skipping unparseable dataset row");
            None
        }
    })
}

/// Finds the identifier and type-code column indices in a candidate header
/// row. Returns `None` when the row is not the header.
pub(crate) fn locate_header(record: &csv::StringRecord) -> Option<(usize, usize)> {
    let mut idx_icao = None;
    let mut idx_type = None;
    for (i, field) in record.iter().enumerate() {
        match clean_field(field).to_lowercase().as_str() {
            COL_ICAO24 => idx_icao = Some(i),
            COL_TYPECODE => idx_type = Some(i),
            _ => {}
        }
    }
    Some((idx_icao?, idx_type?))
}

/// Trims whitespace and stray quote characters from a raw field.
///
/// The published dataset wraps values in single quotes and occasionally
/// leaves an unmatched quote behind.
pub(crate) fn clean_field(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '\'' || c == '"').trim().to_string()
}

/// Sentinel values the dataset uses instead of leaving the field empty.
pub(crate) fn is_unknown_sentinel(typecode: &str) -> bool {
    typecode.eq_ignore_ascii_case("unknown") || typecode.eq_ignore_ascii_case("unknow")
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
    fn test_load_and_lookup() {
        let file = write_dataset(
            "icao24,registration,typecode\n\
             abc123,N123UA,A320\n\
             4b1805,HB-JLT,A20N\n",
        );
        let table = TypeTable::load(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup(&Icao24::new("ABC123").unwrap()),
            Some("A320".into())
        );
        assert_eq!(table.lookup(&Icao24::new("ffffff").unwrap()), None);
    }

    #[test]
    fn test_quoted_fields_are_cleaned() {
        let file = write_dataset(
            "'icao24','registration','typecode'\n\
             'abc123','N123UA','A320'\n\
             'def456','N456','B738\n",
        );
        let table = TypeTable::load(file.path()).unwrap();

        assert_eq!(
            table.lookup(&Icao24::new("abc123").unwrap()),
            Some("A320".into())
        );
        // Stray unmatched quote still yields a clean value
        assert_eq!(
            table.lookup(&Icao24::new("def456").unwrap()),
            Some("B738".into())
        );
    }

    #[test]
    fn test_sentinel_type_codes_are_excluded() {
        let file = write_dataset(
            "icao24,typecode\n\
             abc123,unknow\n\
             def456,UNKNOWN\n\
             aaa111,\n\
             bbb222,A388\n",
        );
        let table = TypeTable::load(file.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&Icao24::new("abc123").unwrap()), None);
        assert_eq!(table.lookup(&Icao24::new("def456").unwrap()), None);
        assert_eq!(table.lookup(&Icao24::new("aaa111").unwrap()), None);
        assert_eq!(
            table.lookup(&Icao24::new("bbb222").unwrap()),
            Some("A388".into())
        );
    }

    #[test]
    fn test_malformed_rows_do_not_abort_load() {
        let file = write_dataset(
            "icao24,typecode\n\
             not-an-address,A320\n\
             ,B738\n\
             abc123,A320\n",
        );
        let table = TypeTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_leading_comment_lines_before_header() {
        let file = write_dataset(
            "# aircraft metadata dump\n\
             # generated nightly\n\
             icao24,typecode\n\
             abc123,A320\n",
        );
        let table = TypeTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_header_is_unreadable() {
        let file = write_dataset("abc123,A320\ndef456,B738\n");
        let err = TypeTable::load(file.path()).unwrap_err();
        assert!(matches!(err, SkyfeedError::DatasetUnreadable(_)));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = TypeTable::load("/nonexistent/db.csv").unwrap_err();
        assert!(matches!(err, SkyfeedError::DatasetUnreadable(_)));
    }
}
