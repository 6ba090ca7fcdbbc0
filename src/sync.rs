//! Thread-safe wrapper for concurrent index access.
//!
//! `SyncIndex` wraps [`GeohashIndex`] in `Arc<RwLock<_>>` so that one index can
//! be shared between threads. Inserts take the write lock and are mutually
//! exclusive with everything else; lookups and searches take the read lock
//! and run concurrently with each other.
//!
//! # Examples
//!
//! ```rust
//! use geomark::{Coordinate, Marker, SyncIndex};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = SyncIndex::new();
//!
//! let writer = index.clone();
//! let handle = thread::spawn(move || {
//!     writer
//!         .insert(Marker::new("a", Coordinate::new(42.6, -5.6), "note"), 7)
//!         .unwrap();
//! });
//! handle.join().unwrap();
//!
//! let found = index.search(&Coordinate::new(42.6, -5.6), 1.0, 7)?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::compute::index::{GeohashIndex, IndexStats, QueryStats};
use crate::config::Config;
use crate::error::Result;
use geomark_types::coordinate::Coordinate;
use geomark_types::marker::Marker;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to a shared [`GeohashIndex`].
///
/// Clones share the same index. Query results are cloned out of the index
/// while the read lock is held, so callers never hold the lock afterwards.
/// A search racing with an insert sees the index either before or after that
/// insert.
#[derive(Clone, Default)]
pub struct SyncIndex {
    inner: Arc<RwLock<GeohashIndex>>,
}

impl SyncIndex {
    /// Creates an empty shared index with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shared index with a custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::from_index(GeohashIndex::with_config(config)?))
    }

    /// Shares an existing index.
    pub fn from_index(index: GeohashIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn insert(&self, marker: Marker, precision: usize) -> Result<String> {
        self.inner.write().insert(marker, precision)
    }

    pub fn insert_marker(&self, marker: Marker) -> Result<String> {
        self.inner.write().insert_marker(marker)
    }

    pub fn remove(
        &self,
        marker_id: &str,
        coordinate: &Coordinate,
        precision: usize,
    ) -> Result<usize> {
        self.inner.write().remove(marker_id, coordinate, precision)
    }

    pub fn lookup(&self, geohash: &str) -> Vec<Marker> {
        self.inner.read().lookup(geohash).to_vec()
    }

    pub fn search(
        &self,
        center: &Coordinate,
        radius_km: f64,
        precision: usize,
    ) -> Result<Vec<Marker>> {
        let index = self.inner.read();
        Ok(index
            .search(center, radius_km, precision)?
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn search_with_stats(
        &self,
        center: &Coordinate,
        radius_km: f64,
        precision: usize,
    ) -> Result<(Vec<Marker>, QueryStats)> {
        let index = self.inner.read();
        let (markers, stats) = index.search_with_stats(center, radius_km, precision)?;
        Ok((markers.into_iter().cloned().collect(), stats))
    }

    pub fn nearby(&self, center: &Coordinate, radius_km: f64) -> Result<Vec<Marker>> {
        let index = self.inner.read();
        Ok(index.nearby(center, radius_km)?.into_iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    /// Runs a closure with shared access to the underlying index.
    pub fn read<R>(&self, f: impl FnOnce(&GeohashIndex) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs a closure with exclusive access to the underlying index.
    pub fn write<R>(&self, f: impl FnOnce(&mut GeohashIndex) -> R) -> R {
        f(&mut self.inner.write())
    }
}
