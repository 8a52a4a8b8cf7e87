//! # Skyfeed Upstream
//!
//! Client for the OpenSky state-vector API and assembly of enriched flight
//! records.
//!
//! The upstream response carries positional arrays; this crate owns the
//! canonical field mapping and substitutes documented defaults for
//! missing/null positions so absence never propagates into a response.
//!
//! ## Example
//!
//! ```rust,ignore
//! use skyfeed_upstream::{FlightFeed, OpenSkyClient, UpstreamConfig};
//!
//! let client = OpenSkyClient::with_config(UpstreamConfig::default());
//! let feed = FlightFeed::new(client, type_cache);
//! let snapshot = feed.fetch_snapshot().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod feed;

pub use client::{OpenSkyClient, RawState, UpstreamConfig};
pub use feed::FlightFeed;
