//! Radius search over the geohash bucket index.
//!
//! A search runs in three stages:
//! - bounds: a latitude/longitude box (or two, across the antimeridian)
//!   enclosing the search circle
//! - covering: a breadth-first walk of the geohash prefix tree that keeps only
//!   prefixes whose cells touch the bounds
//! - filter: the exact haversine test on every marker in a covering bucket

use super::geohash_index::GeohashIndex;
use crate::compute::distance::{EARTH_RADIUS_KM, haversine_km};
use crate::compute::geohash;
use crate::compute::validation::{validate_coordinate, validate_precision, validate_radius};
use crate::error::{GeomarkError, Result};
use geomark_types::bbox::{BoundingBox, Interval};
use geomark_types::coordinate::Coordinate;
use geomark_types::marker::Marker;
use smallvec::{SmallVec, smallvec};
use std::collections::VecDeque;

/// Floor for `cos(latitude)` so the longitude delta stays finite at the poles.
const MIN_COS_LATITUDE: f64 = 1e-12;

/// Slack added to every bound; absorbs rounding between the bounds and the
/// haversine filter for markers sitting exactly on the radius.
const BOUNDS_PADDING_DEG: f64 = 1e-9;

const FULL_LONGITUDE: Interval = Interval::new(-180.0, 180.0);

/// The region a search circle can reach, as one or two boxes.
///
/// Two boxes appear only when the circle crosses the antimeridian.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBounds {
    boxes: SmallVec<[BoundingBox; 2]>,
}

impl QueryBounds {
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Whether a cell touches any of the boxes.
    pub fn intersects(&self, cell: &BoundingBox) -> bool {
        self.boxes.iter().any(|b| b.intersects(cell))
    }

    pub fn contains_point(&self, point: &Coordinate) -> bool {
        self.boxes.iter().any(|b| b.contains_point(point))
    }
}

/// Statistics about a query execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Number of covering cells at the target precision
    pub cells_covered: usize,

    /// Covering cells that had a non-empty bucket
    pub buckets_hit: usize,

    /// Markers read from those buckets before the distance filter
    pub candidates_examined: usize,

    /// Markers that passed the distance filter
    pub results_returned: usize,
}

/// Bounds enclosing the circle of `radius_km` around `center`.
///
/// Latitude extends by the radius as an arc, `degrees(radius / R)`. Longitude
/// starts from the equirectangular estimate `degrees(radius / (R cos lat))`,
/// which grows without bound toward the poles and is clamped there. Away from
/// the poles the estimate slightly undershoots the true reach of a circle on a
/// sphere, so it is widened to the tangent-meridian extent
/// `asin(sin(radius / R) / cos lat)`.
///
/// A circle that reaches a pole covers every longitude. A circle that crosses
/// ±180° longitude is split into two boxes.
pub fn query_bounds(center: &Coordinate, radius_km: f64) -> QueryBounds {
    let angular = radius_km / EARTH_RADIUS_KM;
    let delta_lat = angular.to_degrees();
    let min_lat = center.latitude - delta_lat - BOUNDS_PADDING_DEG;
    let max_lat = center.latitude + delta_lat + BOUNDS_PADDING_DEG;

    if min_lat <= -90.0 || max_lat >= 90.0 {
        log::debug!(
            "search circle around ({}, {}) reaches a pole, covering all longitudes",
            center.latitude,
            center.longitude
        );
        let latitude = Interval::new(min_lat.max(-90.0), max_lat.min(90.0));
        return QueryBounds {
            boxes: smallvec![BoundingBox::new(latitude, FULL_LONGITUDE)],
        };
    }

    let latitude = Interval::new(min_lat, max_lat);
    let cos_lat = center.latitude.to_radians().cos().max(MIN_COS_LATITUDE);
    let equirectangular = (angular / cos_lat).to_degrees();
    let tangent = (angular.sin() / cos_lat).min(1.0).asin().to_degrees();
    let delta_lon = equirectangular.max(tangent) + BOUNDS_PADDING_DEG;

    if delta_lon >= 180.0 {
        return QueryBounds {
            boxes: smallvec![BoundingBox::new(latitude, FULL_LONGITUDE)],
        };
    }

    let min_lon = center.longitude - delta_lon;
    let max_lon = center.longitude + delta_lon;

    let boxes = if min_lon < -180.0 {
        smallvec![
            BoundingBox::new(latitude, Interval::new(min_lon + 360.0, 180.0)),
            BoundingBox::new(latitude, Interval::new(-180.0, max_lon)),
        ]
    } else if max_lon > 180.0 {
        smallvec![
            BoundingBox::new(latitude, Interval::new(min_lon, 180.0)),
            BoundingBox::new(latitude, Interval::new(-180.0, max_lon - 360.0)),
        ]
    } else {
        smallvec![BoundingBox::new(latitude, Interval::new(min_lon, max_lon))]
    };

    QueryBounds { boxes }
}

/// Geohashes of length `precision` whose cells intersect `bounds`.
///
/// Walks the prefix tree breadth-first from the empty hash with a worklist of
/// prefixes; a prefix whose cell misses the bounds is dropped without being
/// expanded. Cells come back in alphabet order and without duplicates.
///
/// # Errors
///
/// Returns [`GeomarkError::QueryTooBroad`] if more than `limit` prefixes would
/// be visited, and [`GeomarkError::InvalidInput`] if `precision` exceeds
/// [`geohash::MAX_PRECISION`].
pub fn covering_cells(
    bounds: &QueryBounds,
    precision: usize,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    validate_precision(precision)?;

    let mut frontier = VecDeque::from([String::new()]);
    let mut cells = Vec::new();
    let mut visited = 0usize;

    while let Some(prefix) = frontier.pop_front() {
        visited += 1;
        if let Some(limit) = limit
            && visited > limit
        {
            return Err(GeomarkError::QueryTooBroad { limit });
        }

        let cell = geohash::bounding_box(&prefix)?;
        if !bounds.intersects(&cell) {
            continue;
        }

        if prefix.len() >= precision {
            cells.push(prefix);
        } else {
            frontier.extend(geohash::children(&prefix));
        }
    }

    log::trace!(
        "covering at precision {} visited {} prefixes, kept {} cells",
        precision,
        visited,
        cells.len()
    );

    Ok(cells)
}

/// A validated radius search.
///
/// # Examples
///
/// ```rust
/// use geomark::{Coordinate, RadiusQuery};
///
/// let query = RadiusQuery::new(Coordinate::new(42.6, -5.6), 5.0, 5)?;
/// let cells = query.covering_cells(None)?;
/// assert!(cells.contains(&"ezs42".to_string()));
/// assert!(cells.iter().all(|cell| cell.len() == 5));
/// # Ok::<(), geomark::GeomarkError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusQuery {
    pub center: Coordinate,
    pub radius_km: f64,
    pub precision: usize,
}

impl RadiusQuery {
    /// # Errors
    ///
    /// Returns [`GeomarkError::OutOfRange`] for an invalid center and
    /// [`GeomarkError::InvalidInput`] for a negative or non-finite radius or a
    /// precision above [`geohash::MAX_PRECISION`].
    pub fn new(center: Coordinate, radius_km: f64, precision: usize) -> Result<Self> {
        validate_coordinate(&center)?;
        validate_radius(radius_km)?;
        validate_precision(precision)?;
        Ok(Self {
            center,
            radius_km,
            precision,
        })
    }

    pub fn bounds(&self) -> QueryBounds {
        query_bounds(&self.center, self.radius_km)
    }

    pub fn covering_cells(&self, limit: Option<usize>) -> Result<Vec<String>> {
        covering_cells(&self.bounds(), self.precision, limit)
    }

    /// Exact test: haversine distance from the center is at most the radius.
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        haversine_km(&self.center, coordinate) <= self.radius_km
    }

    /// Run the query against an index.
    pub fn execute<'a>(&self, index: &'a GeohashIndex) -> Result<Vec<&'a Marker>> {
        self.execute_with_stats(index).map(|(markers, _)| markers)
    }

    /// Run the query and report how much work it did.
    pub fn execute_with_stats<'a>(
        &self,
        index: &'a GeohashIndex,
    ) -> Result<(Vec<&'a Marker>, QueryStats)> {
        let cells = self.covering_cells(index.config().max_covering_cells)?;

        let mut stats = QueryStats {
            cells_covered: cells.len(),
            ..QueryStats::default()
        };
        let mut results = Vec::new();

        for cell in &cells {
            let bucket = index.lookup(cell);
            if bucket.is_empty() {
                continue;
            }
            stats.buckets_hit += 1;
            stats.candidates_examined += bucket.len();
            results.extend(bucket.iter().filter(|m| self.matches(&m.coordinate)));
        }

        stats.results_returned = results.len();
        log::debug!(
            "radius search {} km at precision {}: {} cells, {} candidates, {} results",
            self.radius_km,
            self.precision,
            stats.cells_covered,
            stats.candidates_examined,
            stats.results_returned
        );

        Ok((results, stats))
    }
}

impl GeohashIndex {
    /// Markers within `radius_km` of `center`, inclusive of the boundary.
    ///
    /// `precision` must match the precision the markers were inserted with.
    /// Results are in retrieval order, not sorted by distance.
    ///
    /// # Errors
    ///
    /// Fails on an invalid center or radius, or with
    /// [`GeomarkError::QueryTooBroad`] if the configured traversal limit is hit.
    pub fn search(
        &self,
        center: &Coordinate,
        radius_km: f64,
        precision: usize,
    ) -> Result<Vec<&Marker>> {
        RadiusQuery::new(*center, radius_km, precision)?.execute(self)
    }

    /// Like [`GeohashIndex::search`], also returning [`QueryStats`].
    pub fn search_with_stats(
        &self,
        center: &Coordinate,
        radius_km: f64,
        precision: usize,
    ) -> Result<(Vec<&Marker>, QueryStats)> {
        RadiusQuery::new(*center, radius_km, precision)?.execute_with_stats(self)
    }

    /// Search at the configured default precision.
    pub fn nearby(&self, center: &Coordinate, radius_km: f64) -> Result<Vec<&Marker>> {
        self.search(center, radius_km, self.config().geohash_precision)
    }
}

/// Reference search: the distance test applied to every marker.
///
/// Returns matches in iteration order of `markers`.
pub fn brute_force_search<'a, I>(markers: I, center: &Coordinate, radius_km: f64) -> Vec<&'a Marker>
where
    I: IntoIterator<Item = &'a Marker>,
{
    markers
        .into_iter()
        .filter(|m| haversine_km(center, &m.coordinate) <= radius_km)
        .collect()
}
