//! # Skyfeed Reference
//!
//! Aircraft reference dataset lifecycle: acquire once, index for O(1) lookup,
//! serve concurrently, rebuild-and-swap on explicit refresh.
//!
//! This crate provides two lookup backends behind the same
//! [`TypeSource`](skyfeed_core::TypeSource) trait:
//!
//! - **TypeTable**: The recommended path — parse the CSV once into an
//!   immutable in-memory map
//! - **ScanLookup**: A per-call scan of the dataset file; slow, but cheap on
//!   memory when paired with the bounded lookup cache
//!
//! ## Example
//!
//! ```rust,ignore
//! use skyfeed_reference::{DatasetConfig, ReferenceDataset};
//!
//! let dataset = ReferenceDataset::new(DatasetConfig::default());
//! dataset.load().await?; // download-if-absent, parse, swap in
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dataset;
mod download;
mod scan;
mod table;

pub use dataset::ReferenceDataset;
pub use download::{ensure_available, DatasetConfig};
pub use scan::ScanLookup;
pub use table::TypeTable;
