//! Interchange-format adapters over assembled polygon sets.
//!
//! These adapters never run notation classification: geometry arriving
//! through a file format is already numeric, so their responsibility narrows
//! to ring-closure validation.

pub mod geojson;
pub mod kml;
