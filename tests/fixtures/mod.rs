//! Test fixtures for road-snap.
//!
//! Provides real damaged road segments (Sri Lanka, from OpenStreetMap and
//! OSRM routing) and helpers to turn them into `InfraSegment`s.

pub mod sri_lanka_segments;

pub use sri_lanka_segments::*;
