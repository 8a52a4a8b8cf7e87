//! Domain types for skyfeed.
//!
//! This module provides the core data structures used throughout the proxy:
//!
//! - [`Icao24`]: Canonical 24-bit aircraft transponder address
//! - [`FlightRecord`]: One observed aircraft state, enriched with a type code
//! - [`FlightSnapshot`]: The immutable result of one upstream fetch

mod aircraft;
mod flight;

pub use aircraft::*;
pub use flight::*;
