//! Validation for coordinates and user-entered marker fields.
//!
//! Range checks guard the codec. Text parsing belongs to whoever collects
//! marker input; it lives here so that every front end rejects malformed
//! numbers the same way before anything reaches the index.

use crate::compute::geohash::MAX_PRECISION;
use crate::error::{GeomarkError, Result};
use geomark_types::coordinate::Coordinate;
use geomark_types::marker::{Marker, Visibility};
use std::time::SystemTime;
use thiserror::Error;

/// Rejections for user-supplied marker fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Validates a coordinate is finite and within latitude [-90, 90], longitude [-180, 180].
///
/// # Examples
///
/// ```
/// use geomark::Coordinate;
/// use geomark::validation::validate_coordinate;
///
/// assert!(validate_coordinate(&Coordinate::new(40.7128, -74.0060)).is_ok());
/// assert!(validate_coordinate(&Coordinate::new(95.0, -74.0)).is_err());
/// assert!(validate_coordinate(&Coordinate::new(40.0, 200.0)).is_err());
/// ```
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<()> {
    if coordinate.is_in_range() {
        return Ok(());
    }

    let Coordinate {
        latitude,
        longitude,
    } = *coordinate;

    if !latitude.is_finite() {
        return Err(GeomarkError::OutOfRange(format!(
            "Latitude must be finite, got: {}",
            latitude
        )));
    }

    if !longitude.is_finite() {
        return Err(GeomarkError::OutOfRange(format!(
            "Longitude must be finite, got: {}",
            longitude
        )));
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeomarkError::OutOfRange(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GeomarkError::OutOfRange(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            longitude
        )));
    }

    Ok(())
}

/// Validates a geohash length is at most [`MAX_PRECISION`] characters.
///
/// Zero is accepted and names the whole world.
pub fn validate_precision(precision: usize) -> Result<()> {
    if precision > MAX_PRECISION {
        return Err(GeomarkError::InvalidInput(format!(
            "Geohash precision must be at most {}, got: {}",
            MAX_PRECISION, precision
        )));
    }
    Ok(())
}

/// Validates a search radius is finite and not negative.
pub fn validate_radius(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(GeomarkError::InvalidInput(format!(
            "Radius must be a finite, non-negative number of kilometers, got: {}",
            radius_km
        )));
    }
    Ok(())
}

/// Parse latitude and longitude text into a coordinate.
///
/// Surrounding whitespace is ignored. Empty fields and unparsable numbers are
/// [`ValidationError`]s; parsed values outside the geographic ranges are
/// [`GeomarkError::OutOfRange`].
///
/// # Examples
///
/// ```
/// use geomark::validation::parse_coordinate;
///
/// let c = parse_coordinate(" 55.75 ", "37.61")?;
/// assert_eq!(c.latitude, 55.75);
///
/// assert!(parse_coordinate("55,75", "37.61").is_err());
/// # Ok::<(), geomark::GeomarkError>(())
/// ```
pub fn parse_coordinate(latitude: &str, longitude: &str) -> Result<Coordinate> {
    let coordinate = Coordinate::new(
        parse_number("latitude", latitude)?,
        parse_number("longitude", longitude)?,
    );
    validate_coordinate(&coordinate)?;
    Ok(coordinate)
}

fn parse_number(field: &'static str, text: &str) -> std::result::Result<f64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    text.parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

/// Raw marker form input, as typed by a user.
#[derive(Debug, Clone, Default)]
pub struct MarkerDraft {
    pub note: String,
    pub latitude: String,
    pub longitude: String,
    pub public: bool,
}

impl MarkerDraft {
    pub fn new(
        note: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            note: note.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            public: false,
        }
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Check all fields are present and the coordinates parse, returning the coordinate.
    pub fn validate(&self) -> Result<Coordinate> {
        if self.note.trim().is_empty() {
            return Err(ValidationError::MissingField("note").into());
        }
        parse_coordinate(&self.latitude, &self.longitude)
    }

    /// Turn a valid draft into a marker owned by `owner_id`, with a fresh id and timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use geomark::validation::MarkerDraft;
    ///
    /// let marker = MarkerDraft::new("Pull-up bars", "42.6", "-5.6")
    ///     .public(true)
    ///     .into_marker("user-7")?;
    ///
    /// assert!(marker.is_public());
    /// assert_eq!(marker.note, "Pull-up bars");
    /// assert_eq!(marker.owner_id, "user-7");
    /// # Ok::<(), geomark::GeomarkError>(())
    /// ```
    pub fn into_marker(self, owner_id: impl Into<String>) -> Result<Marker> {
        let coordinate = self.validate()?;
        let visibility = if self.public {
            Visibility::Public
        } else {
            Visibility::Private
        };

        Ok(Marker {
            id: uuid::Uuid::new_v4().to_string(),
            coordinate,
            note: self.note.trim().to_string(),
            visibility,
            owner_id: owner_id.into(),
            timestamp: SystemTime::now(),
        })
    }
}
