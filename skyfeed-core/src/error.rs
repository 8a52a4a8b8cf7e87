//! Error types for skyfeed.
//!
//! This module provides the error hierarchy using `thiserror`. All errors
//! carry enough context (operation, target, underlying cause) to diagnose a
//! failure from the log line alone.

use thiserror::Error;

/// Result type alias using `SkyfeedError`.
pub type Result<T> = std::result::Result<T, SkyfeedError>;

/// Main error type for all skyfeed operations.
#[derive(Debug, Error)]
pub enum SkyfeedError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REFERENCE DATASET ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Downloading the reference dataset failed at the transport level.
    #[error("dataset download failed from '{url}': {reason}")]
    DownloadFailed {
        /// Remote dataset URL
        url: String,
        /// Underlying transport failure
        reason: String,
    },

    /// The dataset host answered with a non-success status.
    #[error("dataset host returned status {status} for '{url}'")]
    UnexpectedStatus {
        /// Remote dataset URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Reading or writing the local dataset copy failed.
    #[error("filesystem error at '{path}': {source}")]
    Filesystem {
        /// Local file path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The dataset file is structurally unreadable (missing header,
    /// undecodable content). Individual malformed rows are skipped, not
    /// reported through this variant.
    #[error("reference dataset unreadable: {0}")]
    DatasetUnreadable(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM API ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The flight-state API could not be reached (transport error, timeout).
    #[error("upstream flight API unreachable: {0}")]
    UpstreamUnavailable(String),

    /// The flight-state API answered with a non-success status.
    #[error("upstream flight API returned status {status}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
    },

    /// The flight-state API response lacked the expected shape.
    #[error("malformed upstream response: {0}")]
    MalformedUpstream(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & I/O
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error without a specific path context.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl SkyfeedError {
    /// Returns true if this error is recoverable (the next request cycle can
    /// retry it).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SkyfeedError::DownloadFailed { .. }
                | SkyfeedError::UnexpectedStatus { .. }
                | SkyfeedError::UpstreamUnavailable(_)
                | SkyfeedError::UpstreamStatus { .. }
        )
    }

    /// Returns true if this error concerns the reference dataset lifecycle.
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            SkyfeedError::DownloadFailed { .. }
                | SkyfeedError::UnexpectedStatus { .. }
                | SkyfeedError::Filesystem { .. }
                | SkyfeedError::DatasetUnreadable(_)
        )
    }

    /// Returns true if this error came from the flight-state API.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            SkyfeedError::UpstreamUnavailable(_)
                | SkyfeedError::UpstreamStatus { .. }
                | SkyfeedError::MalformedUpstream(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SkyfeedError::UnexpectedStatus {
            url: "https://example.com/db.csv".into(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("db.csv"));
    }

    #[test]
    fn test_error_classification() {
        assert!(SkyfeedError::UpstreamUnavailable("timeout".into()).is_recoverable());
        assert!(SkyfeedError::UpstreamStatus { status: 502 }.is_upstream_error());
        assert!(!SkyfeedError::ConfigError("bad port".into()).is_recoverable());

        let fs = SkyfeedError::Filesystem {
            path: "db.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(fs.is_dataset_error());
        assert!(!fs.is_upstream_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let skyfeed_result: Result<serde_json::Value> = json_result.map_err(SkyfeedError::from);
        assert!(matches!(skyfeed_result, Err(SkyfeedError::JsonError(_))));
    }
}
