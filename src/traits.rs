//! Core seams between segment processing and geometry sources.

use crate::polyline::{GeoPath, GeoPoint};

/// Produces a road-following path between two coordinates.
///
/// Implementations never fail: when real geometry is unavailable they fall
/// back to a straight line between the two points.
pub trait RoadSnapper {
    fn snap(&self, origin: GeoPoint, destination: GeoPoint) -> GeoPath;
}

impl<T: RoadSnapper + ?Sized> RoadSnapper for &T {
    fn snap(&self, origin: GeoPoint, destination: GeoPoint) -> GeoPath {
        (**self).snap(origin, destination)
    }
}
