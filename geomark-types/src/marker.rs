use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Who may see a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

/// A user-placed note pinned to a coordinate.
///
/// The index routes markers by their coordinate only; every other field is
/// carried through untouched for the application that owns them.
///
/// # Examples
///
/// ```
/// use geomark_types::coordinate::Coordinate;
/// use geomark_types::marker::{Marker, Visibility};
///
/// let marker = Marker::new("m-1", Coordinate::new(55.75, 37.61), "Morning run start")
///     .with_owner("user-42")
///     .with_visibility(Visibility::Public);
///
/// assert!(marker.is_public());
/// assert_eq!(marker.owner_id, "user-42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Application-assigned identifier; uniqueness is not enforced
    pub id: String,
    pub coordinate: Coordinate,
    /// Free-form note text
    pub note: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Identifier of the user that placed the marker
    #[serde(default)]
    pub owner_id: String,
    pub timestamp: SystemTime,
}

impl Marker {
    /// Create a private, ownerless marker stamped with the current time.
    pub fn new(id: impl Into<String>, coordinate: Coordinate, note: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinate,
            note: note.into(),
            visibility: Visibility::default(),
            owner_id: String::new(),
            timestamp: SystemTime::now(),
        }
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Public markers are visible to everyone, private ones only to their owner.
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.is_public() || self.owner_id == user_id
    }
}
