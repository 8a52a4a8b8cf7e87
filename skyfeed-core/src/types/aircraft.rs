//! Aircraft identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ICAO24_HEX_LEN;

/// A canonical ICAO 24-bit transponder address.
///
/// Rendered as 6 hex characters, case-insensitive on input, canonicalized to
/// lowercase for all lookups and keys. Construction validates the format;
/// an invalid identifier is unresolvable, never an error.
///
/// # Example
///
/// ```rust
/// use skyfeed_core::Icao24;
///
/// let icao = Icao24::new(" ABC123 ").unwrap();
/// assert_eq!(icao.as_str(), "abc123");
/// assert!(Icao24::new("").is_none());
/// assert!(Icao24::new("not-hex").is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icao24(String);

impl Icao24 {
    /// Parses an identifier from raw input.
    ///
    /// Trims whitespace and lowercases. Returns `None` when the result is not
    /// exactly 6 hex characters (a 24-bit address).
    pub fn new(raw: &str) -> Option<Self> {
        let canonical = raw.trim().to_lowercase();
        if canonical.len() != ICAO24_HEX_LEN {
            return None;
        }
        // 6 hex chars decode to exactly 3 bytes
        match hex::decode(&canonical) {
            Ok(bytes) if bytes.len() == ICAO24_HEX_LEN / 2 => Some(Self(canonical)),
            _ => None,
        }
    }

    /// Returns the canonical lowercase hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Icao24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Icao24 {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
