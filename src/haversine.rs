//! Great-circle distances between coordinates.
//!
//! Used to sanity-check snapped geometry: a road-following path should start
//! and end close to the coordinates that were requested.

use crate::polyline::{GeoPath, GeoPoint};

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters.
pub fn distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Total length of a path in meters, summed over consecutive waypoints.
pub fn path_length_m(path: &GeoPath) -> f64 {
    path.points()
        .windows(2)
        .map(|pair| distance_m(pair[0], pair[1]))
        .sum()
}

/// How far a path's ends sit from the requested origin and destination.
///
/// Returns `(start_drift_m, end_drift_m)`, or `None` for an empty path.
pub fn endpoint_drift_m(path: &GeoPath, origin: GeoPoint, destination: GeoPoint) -> Option<(f64, f64)> {
    let first = path.first()?;
    let last = path.last()?;
    Some((distance_m(origin, first), distance_m(destination, last)))
}
