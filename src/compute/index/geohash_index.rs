//! Core implementation of the geohash bucket index.

use crate::compute::geohash;
use crate::config::Config;
use crate::error::{GeomarkError, Result};
use geomark_types::coordinate::Coordinate;
use geomark_types::marker::Marker;
use rustc_hash::FxHashMap;

/// Statistics for a single bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketStats {
    /// The geohash key of this bucket
    pub geohash: String,
    /// Number of markers filed under it
    pub marker_count: usize,
}

/// Overall statistics for the index.
#[derive(Debug, Clone)]
pub struct IndexStats {
    /// Total number of buckets
    pub bucket_count: usize,
    /// Total number of stored markers, duplicates included
    pub marker_count: usize,
    /// Average markers per bucket
    pub avg_markers_per_bucket: f64,
    /// Per-bucket statistics, largest bucket first
    pub buckets: Vec<BucketStats>,
}

/// Markers bucketed by the geohash of their coordinate.
///
/// # Ownership
///
/// The index owns every marker inserted into it. Buckets are append-only
/// sequences: duplicates are kept and insertion order is preserved. A bucket
/// only exists once something has been filed under it.
///
/// # Thread Safety
///
/// This structure is not synchronized. Use [`crate::SyncIndex`] or your own
/// `Arc<RwLock<_>>` to share it between threads.
///
/// # Memory Layout
///
/// ```text
/// GeohashIndex
/// └─ buckets: HashMap<String, Vec<Marker>>
///    ├─ "ezs42b7" -> [m1, m2]
///    └─ "ezs42b6" -> [m3]
/// ```
#[derive(Debug, Default)]
pub struct GeohashIndex {
    pub(crate) buckets: FxHashMap<String, Vec<Marker>>,
    config: Config,
    marker_count: usize,
}

impl GeohashIndex {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeomarkError::Config`] if the configuration does not validate.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().map_err(GeomarkError::Config)?;
        Ok(Self {
            buckets: FxHashMap::default(),
            config,
            marker_count: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of buckets in use.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of stored markers, duplicates included.
    pub fn len(&self) -> usize {
        self.marker_count
    }

    pub fn is_empty(&self) -> bool {
        self.marker_count == 0
    }

    /// File a marker under the geohash of its coordinate at `precision`.
    ///
    /// Returns the geohash key the marker was stored under. The marker's
    /// content is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`GeomarkError::OutOfRange`] if the marker's coordinate cannot be encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geomark::{Coordinate, GeohashIndex, Marker};
    ///
    /// let mut index = GeohashIndex::new();
    /// let key = index.insert(Marker::new("m1", Coordinate::new(42.6, -5.6), "note"), 5)?;
    /// assert_eq!(key, "ezs42");
    /// assert_eq!(index.lookup("ezs42").len(), 1);
    /// # Ok::<(), geomark::GeomarkError>(())
    /// ```
    pub fn insert(&mut self, marker: Marker, precision: usize) -> Result<String> {
        let hash = geohash::encode(&marker.coordinate, precision)?;

        let bucket = self.buckets.entry(hash.clone()).or_insert_with(|| {
            log::trace!("creating bucket {hash}");
            Vec::new()
        });
        bucket.push(marker);
        self.marker_count += 1;

        Ok(hash)
    }

    /// File a marker at the configured default precision.
    pub fn insert_marker(&mut self, marker: Marker) -> Result<String> {
        self.insert(marker, self.config.geohash_precision)
    }

    /// The markers filed under exactly `geohash`, in insertion order.
    ///
    /// An unknown key yields an empty slice.
    pub fn lookup(&self, geohash: &str) -> &[Marker] {
        self.buckets
            .get(geohash)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Remove every entry with `marker_id` from the bucket its coordinate maps to.
    ///
    /// Retained markers keep their relative order and an emptied bucket is
    /// dropped. Returns how many entries were removed.
    pub fn remove(
        &mut self,
        marker_id: &str,
        coordinate: &Coordinate,
        precision: usize,
    ) -> Result<usize> {
        let hash = geohash::encode(coordinate, precision)?;
        let Some(bucket) = self.buckets.get_mut(&hash) else {
            return Ok(0);
        };

        let before = bucket.len();
        bucket.retain(|marker| marker.id != marker_id);
        let removed = before - bucket.len();

        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        self.marker_count -= removed;

        Ok(removed)
    }

    /// Drop every bucket.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.marker_count = 0;
    }

    /// Iterate over `(geohash, markers)` pairs in no particular order.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[Marker])> {
        self.buckets
            .iter()
            .map(|(hash, markers)| (hash.as_str(), markers.as_slice()))
    }

    /// Iterate over every stored marker in no particular bucket order.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.buckets.values().flatten()
    }

    /// Bucket and marker counts.
    pub fn stats(&self) -> IndexStats {
        let bucket_count = self.buckets.len();
        let marker_count = self.marker_count;

        let avg_markers_per_bucket = if bucket_count > 0 {
            marker_count as f64 / bucket_count as f64
        } else {
            0.0
        };

        let mut buckets: Vec<BucketStats> = self
            .buckets
            .iter()
            .map(|(hash, markers)| BucketStats {
                geohash: hash.clone(),
                marker_count: markers.len(),
            })
            .collect();

        buckets.sort_by(|a, b| {
            b.marker_count
                .cmp(&a.marker_count)
                .then_with(|| a.geohash.cmp(&b.geohash))
        });

        IndexStats {
            bucket_count,
            marker_count,
            avg_markers_per_bucket,
            buckets,
        }
    }
}
