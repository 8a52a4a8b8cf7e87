//! Download-if-absent acquisition of the reference dataset.
//!
//! Modeled as an idempotent setup step: when a local copy exists it is used
//! as-is; otherwise the dataset is fetched once from the configured remote
//! host and persisted atomically before anything reads it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};
use url::Url;

use skyfeed_core::constants::{
    DEFAULT_DATASET_PATH, DEFAULT_DATASET_URL, DEFAULT_HTTP_TIMEOUT_SECONDS,
};
use skyfeed_core::error::{Result, SkyfeedError};

/// Reference dataset configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Remote dataset URL
    pub url: String,
    /// Local path for the downloaded copy
    pub path: PathBuf,
    /// Download timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.into(),
            path: DEFAULT_DATASET_PATH.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
        }
    }
}

impl DatasetConfig {
    /// Creates a configuration with the given remote URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the local dataset path.
    pub fn at_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// Guarantees a local copy of the reference dataset exists.
///
/// Returns the local path. Downloads from the configured remote host only
/// when no local copy is present; an existing file is never re-fetched.
///
/// # Errors
///
/// - [`SkyfeedError::ConfigError`] when the remote URL does not parse
/// - [`SkyfeedError::DownloadFailed`] when the host is unreachable or the
///   transfer times out
/// - [`SkyfeedError::UnexpectedStatus`] on a non-success response
/// - [`SkyfeedError::Filesystem`] when the local write fails
#[instrument(skip(config), fields(url = %config.url))]
pub async fn ensure_available(config: &DatasetConfig) -> Result<PathBuf> {
    if config.path.exists() {
        debug!(path = ?config.path, "Using existing reference dataset");
        return Ok(config.path.clone());
    }

    Url::parse(&config.url)
        .map_err(|e| SkyfeedError::ConfigError(format!("invalid dataset URL '{}': {}", config.url, e)))?;

    info!(url = %config.url, path = ?config.path, "Downloading reference dataset");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| SkyfeedError::DownloadFailed {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

    let response = client
        .get(&config.url)
        .send()
        .await
        .map_err(|e| SkyfeedError::DownloadFailed {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SkyfeedError::UnexpectedStatus {
            url: config.url.clone(),
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SkyfeedError::DownloadFailed {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

    write_atomic(&config.path, &body).await?;

    info!(path = ?config.path, bytes = body.len(), "Reference dataset downloaded");
    Ok(config.path.clone())
}

/// Writes the dataset atomically (write to temp, then rename) so a partial
/// download never masquerades as a valid local copy.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let fs_err = |e: std::io::Error| SkyfeedError::Filesystem {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(fs_err)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).await.map_err(fs_err)?;
    file.write_all(contents).await.map_err(fs_err)?;
    file.sync_all().await.map_err(fs_err)?;

    fs::rename(&temp_path, path).await.map_err(fs_err)?;
    Ok(())
}
