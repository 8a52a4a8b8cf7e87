//! # Skyfeed Cache
//!
//! The two caches that bound skyfeed's upstream traffic:
//!
//! - [`TypeCache`]: bounded LRU over a [`TypeSource`](skyfeed_core::TypeSource),
//!   making repeated identifier lookups O(1) after first resolution
//! - [`SnapshotCache`]: time-windowed memo of the merged flight list with
//!   single-flight refresh and stale-but-available fallback
//!
//! Both are thread-safe and designed to be constructed at startup and shared
//! via `Arc` with the request handlers.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod lookup;
mod snapshot;

pub use lookup::{LookupStats, TypeCache};
pub use snapshot::SnapshotCache;
