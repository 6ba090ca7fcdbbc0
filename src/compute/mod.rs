//! Compute layer: the geohash codec, distance math, input validation and the
//! bucketed marker index built on them.
//!
//! Nothing here performs I/O or holds global state. The index is an explicit
//! value that callers construct and pass around.

pub mod distance;
pub mod geohash;
pub mod index;
pub mod validation;
