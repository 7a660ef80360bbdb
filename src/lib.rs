//! road-snap core
//!
//! Encoded polyline decoding and road-following geometry for damaged
//! infrastructure segments.

pub mod traits;
pub mod polyline;
pub mod haversine;
pub mod directions;
pub mod segments;
pub mod legend;
