//! # Skyfeed Core
//!
//! Core types, errors, and traits for the skyfeed flight proxy.
//!
//! This crate provides the foundational building blocks used by all other
//! skyfeed crates:
//!
//! - **Types**: Domain models for aircraft identifiers, flight records, and
//!   snapshots
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Default endpoints, cache sizes, and time windows
//! - **Traits**: Common interfaces for lookup and fetch backends
//!
//! ## Example
//!
//! ```rust
//! use skyfeed_core::{FlightRecord, Icao24};
//!
//! let icao = Icao24::new(" ABC123 ").unwrap();
//! assert_eq!(icao.as_str(), "abc123");
//!
//! let record = FlightRecord::default();
//! let json = serde_json::to_string(&record).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, SkyfeedError};
pub use traits::*;
pub use types::*;
