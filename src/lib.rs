//! Geohash-bucketed marker index with radius search.
//!
//! ## Features
//! - **Geohash codec**: coordinate to base-32 hash, hash to cell center and cell bounds
//! - **Bucket index**: markers filed under the geohash of their coordinate
//! - **Radius search**: pruned prefix-tree covering, then an exact haversine filter
//! - **Concurrency**: `SyncIndex` shares one index behind a read/write lock
//!
//! ```rust
//! use geomark::{Coordinate, GeohashIndex, Marker, geohash};
//!
//! assert_eq!(geohash::encode(&Coordinate::new(42.6, -5.6), 5)?, "ezs42");
//!
//! let mut index = GeohashIndex::new();
//! index.insert(Marker::new("m1", Coordinate::new(42.6, -5.6), "Park bench"), 7)?;
//!
//! let nearby = index.search(&Coordinate::new(42.601, -5.601), 1.0, 7)?;
//! assert_eq!(nearby[0].note, "Park bench");
//! # Ok::<(), geomark::GeomarkError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
#[cfg(feature = "sync")]
pub mod sync;

pub use compute::index::{
    BucketStats, GeohashIndex, IndexStats, QueryBounds, QueryStats, RadiusQuery,
};
pub use compute::{distance, geohash, validation};
pub use config::Config;
pub use error::{GeomarkError, Result};
#[cfg(feature = "sync")]
pub use sync::SyncIndex;

pub use distance::{DistanceMetric, EARTH_RADIUS_KM, haversine_km};
pub use validation::{MarkerDraft, ValidationError};

pub use geomark_types::bbox::{BoundingBox, Interval};
pub use geomark_types::coordinate::Coordinate;
pub use geomark_types::marker::{Marker, Visibility};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, GeohashIndex, GeomarkError, RadiusQuery, Result};

    #[cfg(feature = "sync")]
    pub use crate::SyncIndex;

    pub use crate::{BoundingBox, Coordinate, Marker, Visibility};

    pub use crate::{geohash, haversine_km, validation};
}
