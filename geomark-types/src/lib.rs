//! # geomark-types
//!
//! Plain data types shared by the geomark geohash index:
//!
//! - **Coordinates**: `Coordinate` (latitude/longitude in degrees)
//! - **Bounding boxes**: `Interval`, `BoundingBox`
//! - **Markers**: `Marker`, `Visibility`
//!
//! All types are serializable with Serde and convert to the `geo` crate's
//! primitives where one exists.
//!
//! ## Examples
//!
//! ```rust
//! use geomark_types::bbox::BoundingBox;
//! use geomark_types::coordinate::Coordinate;
//!
//! let leon = Coordinate::new(42.6, -5.6);
//! assert!(BoundingBox::WORLD.contains_point(&leon));
//!
//! let point: geo::Point = leon.into();
//! assert_eq!(point.x(), -5.6);
//! ```

pub mod bbox;
pub mod coordinate;
pub mod marker;
