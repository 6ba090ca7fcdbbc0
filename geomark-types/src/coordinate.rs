use geo::Point;
use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]. The type
/// itself does not enforce the ranges; validation happens at the API boundary
/// that consumes it.
///
/// # Examples
///
/// ```
/// use geomark_types::coordinate::Coordinate;
///
/// let madrid = Coordinate::new(40.4168, -3.7038);
/// assert_eq!(madrid.latitude, 40.4168);
/// assert_eq!(madrid.longitude, -3.7038);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude, in that order.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside the geographic ranges.
    pub fn is_in_range(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.longitude, coordinate.latitude)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interprets the tuple as `(latitude, longitude)`.
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
