//! Great-circle distance between coordinates.

use geo::{Distance, Geodesic, HaversineMeasure, Point};
use geomark_types::coordinate::Coordinate;

/// Mean Earth radius used by the haversine formula and the query bounds, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine on a sphere of [`EARTH_RADIUS_KM`]; distances come out in kilometers.
const HAVERSINE_KM: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_KM);

/// Distance metrics for comparing coordinates.
///
/// - **Haversine**: spherical Earth of radius [`EARTH_RADIUS_KM`]; what radius
///   search filters with
/// - **Geodesic**: ellipsoidal distance (Karney 2013) via the `geo` crate, slower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
}

/// Haversine distance between two coordinates in kilometers.
///
/// Symmetric, never negative, and zero for identical inputs.
///
/// # Examples
///
/// ```rust
/// use geomark::{Coordinate, distance::haversine_km};
///
/// let moscow = Coordinate::new(55.7558, 37.6173);
/// let spb = Coordinate::new(59.9343, 30.3351);
///
/// let km = haversine_km(&moscow, &spb);
/// assert!((630.0..640.0).contains(&km));
/// ```
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    HAVERSINE_KM.distance(Point::from(*a), Point::from(*b))
}

/// Distance in kilometers using the chosen metric.
pub fn distance_between(a: &Coordinate, b: &Coordinate, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Haversine => haversine_km(a, b),
        DistanceMetric::Geodesic => Geodesic.distance(Point::from(*a), Point::from(*b)) / 1000.0,
    }
}
