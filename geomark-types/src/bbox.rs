use crate::coordinate::Coordinate;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]` of degrees along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the interval.
    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Length of the interval in degrees.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive membership test.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Closed intervals overlap unless one ends before the other starts.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.max < other.min || self.min > other.max)
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn encloses(&self, other: &Interval) -> bool {
        other.min >= self.min && other.max <= self.max
    }
}

/// A latitude/longitude rectangle.
///
/// Produced by the geohash codec for a cell and by the radius query for the
/// region around a search circle. Both intervals are closed, so two boxes that
/// only share an edge still intersect.
///
/// # Examples
///
/// ```
/// use geomark_types::bbox::{BoundingBox, Interval};
/// use geomark_types::coordinate::Coordinate;
///
/// let iberia = BoundingBox::new(Interval::new(36.0, 43.8), Interval::new(-9.5, 3.3));
/// assert!(iberia.contains_point(&Coordinate::new(40.4, -3.7)));
/// assert!(iberia.intersects(&BoundingBox::WORLD));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Latitude range
    pub latitude: Interval,
    /// Longitude range
    pub longitude: Interval,
}

impl BoundingBox {
    /// The whole world, the extent of the empty geohash.
    pub const WORLD: BoundingBox = BoundingBox {
        latitude: Interval::new(-90.0, 90.0),
        longitude: Interval::new(-180.0, 180.0),
    };

    pub const fn new(latitude: Interval, longitude: Interval) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn min_latitude(&self) -> f64 {
        self.latitude.min
    }

    pub fn max_latitude(&self) -> f64 {
        self.latitude.max
    }

    pub fn min_longitude(&self) -> f64 {
        self.longitude.min
    }

    pub fn max_longitude(&self) -> f64 {
        self.longitude.max
    }

    /// Center of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude.mid(), self.longitude.mid())
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: &Coordinate) -> bool {
        self.latitude.contains(point.latitude) && self.longitude.contains(point.longitude)
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.latitude.encloses(&other.latitude) && self.longitude.encloses(&other.longitude)
    }

    /// Axis-aligned intersection test on closed intervals.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.latitude.overlaps(&other.latitude) && self.longitude.overlaps(&other.longitude)
    }

    /// Convert to a `geo::Rect` with x = longitude and y = latitude.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            geo::coord! { x: self.longitude.min, y: self.latitude.min },
            geo::coord! { x: self.longitude.max, y: self.latitude.max },
        )
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::new(
            Interval::new(rect.min().y, rect.max().y),
            Interval::new(rect.min().x, rect.max().x),
        )
    }
}
