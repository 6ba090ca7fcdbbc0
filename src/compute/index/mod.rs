//! # Geohash Bucket Index with Radius Search
//!
//! Markers are filed into buckets keyed by the geohash of their coordinate at
//! a fixed precision. A radius search never scans the whole index: it works
//! out which cells could hold a match, reads only those buckets, and then
//! applies the exact distance test.
//!
//! ## How It Works
//!
//! ### Insertion Flow
//! ```text
//! 1. Marker arrives with a coordinate
//! 2. Encode the coordinate as a geohash of the requested precision
//! 3. Append the marker to that geohash's bucket (created on first use)
//! ```
//!
//! ### Query Flow
//! ```text
//! 1. Derive latitude/longitude bounds around the search circle
//! 2. Walk the geohash prefix tree breadth-first from the empty hash,
//!    dropping every prefix whose cell misses the bounds
//! 3. Prefixes that reach the target precision are the covering cells
//! 4. Read the bucket of each covering cell
//! 5. Keep markers whose haversine distance is within the radius
//! ```
//!
//! Results come back in retrieval order: covering cells in breadth-first
//! alphabet order, and insertion order within a bucket. They are not sorted
//! by distance.
//!
//! ## Precision Guidelines
//!
//! A search must use the precision the markers were inserted with, since the
//! covering cells are looked up by exact key.
//!
//! | Precision | Cell Size (approx) | Use Case |
//! |-----------|-------------------|----------|
//! | 4         | ~39km × 20km      | Regional queries |
//! | 5         | ~4.9km × 4.9km    | City-level queries |
//! | 6         | ~1.2km × 0.6km    | Neighborhood queries |
//! | 7         | ~153m × 153m      | Street-level queries (default) |
//! | 8         | ~38m × 19m        | Building-level queries |
//!
//! Higher precision means fewer false candidates per bucket but a deeper
//! traversal and more buckets visited.
//!
//! ## Examples
//!
//! ```rust
//! use geomark::{Coordinate, GeohashIndex, Marker};
//!
//! let mut index = GeohashIndex::new();
//!
//! let key = index.insert(Marker::new("plaza", Coordinate::new(42.5987, -5.5671), "Plaza"), 7)?;
//! assert_eq!(key.len(), 7);
//! index.insert(Marker::new("far", Coordinate::new(43.3623, -8.4115), "A Coruña"), 7)?;
//!
//! let nearby = index.search(&Coordinate::new(42.6, -5.57), 2.0, 7)?;
//! assert_eq!(nearby.len(), 1);
//! assert_eq!(nearby[0].id, "plaza");
//! # Ok::<(), geomark::GeomarkError>(())
//! ```

pub mod geohash_index;
pub mod query;


pub use geohash_index::{BucketStats, GeohashIndex, IndexStats};
pub use query::{
    QueryBounds, QueryStats, RadiusQuery, brute_force_search, covering_cells, query_bounds,
};
