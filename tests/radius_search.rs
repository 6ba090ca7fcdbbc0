use geomark::compute::index::brute_force_search;
use geomark::{Config, Coordinate, GeohashIndex, GeomarkError, Marker, Visibility, haversine_km};

/// Deterministic xorshift generator so failures are reproducible.
struct Scatter(u64);

impl Scatter {
    fn next_unit(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 % 10_000_000) as f64 / 10_000_000.0
    }

    fn coordinate(&mut self, lat: (f64, f64), lon: (f64, f64)) -> Coordinate {
        Coordinate::new(
            lat.0 + self.next_unit() * (lat.1 - lat.0),
            lon.0 + self.next_unit() * (lon.1 - lon.0),
        )
    }
}

fn sorted_ids(markers: &[&Marker]) -> Vec<String> {
    let mut ids: Vec<String> = markers.iter().map(|m| m.id.clone()).collect();
    ids.sort();
    ids
}

fn populated(precision: usize, count: usize, lat: (f64, f64), lon: (f64, f64)) -> GeohashIndex {
    let mut scatter = Scatter(0x9e37_79b9_7f4a_7c15);
    let mut index = GeohashIndex::new();
    for i in 0..count {
        let marker = Marker::new(format!("m{i}"), scatter.coordinate(lat, lon), "");
        index.insert(marker, precision).expect("insert");
    }
    index
}

/// Test 1: search agrees with a full scan at several precisions
#[test]
fn test_search_equals_brute_force() {
    for precision in [3, 4, 5, 6] {
        let index = populated(precision, 2_000, (50.0, 60.0), (30.0, 45.0));
        let centers = [
            Coordinate::new(55.75, 37.62),
            Coordinate::new(51.0, 31.0),
            Coordinate::new(59.9, 44.5),
        ];

        for center in centers {
            for radius in [1.0, 10.0, 50.0, 150.0] {
                // Fine cells over a wide circle only add traversal time.
                if precision > 5 && radius > 50.0 {
                    continue;
                }
                let expected = brute_force_search(index.markers(), &center, radius);
                let actual = index.search(&center, radius, precision).expect("search");
                assert_eq!(
                    sorted_ids(&actual),
                    sorted_ids(&expected),
                    "precision {precision}, center {center:?}, radius {radius}"
                );
            }
        }
    }
}

/// Test 2: every result is within the radius and no result repeats
#[test]
fn test_results_within_radius_and_unique() {
    let index = populated(5, 1_000, (-10.0, 10.0), (-10.0, 10.0));
    let center = Coordinate::new(0.0, 0.0);

    let results = index.search(&center, 300.0, 5).expect("search");
    assert!(!results.is_empty());
    for marker in &results {
        assert!(haversine_km(&center, &marker.coordinate) <= 300.0);
    }

    let ids = sorted_ids(&results);
    let mut deduped = ids.clone();
    deduped.dedup();
    assert_eq!(ids, deduped);
}

/// Test 3: radius boundary is inclusive, anything beyond is excluded
#[test]
fn test_boundary_inclusion() {
    let mut index = GeohashIndex::new();
    let center = Coordinate::new(48.8566, 2.3522);
    let on_edge = Coordinate::new(48.9566, 2.3522);
    let radius = haversine_km(&center, &on_edge);

    index.insert(Marker::new("edge", on_edge, ""), 7).expect("insert");

    assert_eq!(index.search(&center, radius, 7).expect("search").len(), 1);
    assert!(index
        .search(&center, radius - 1e-7, 7)
        .expect("search")
        .is_empty());
}

/// Test 4: zero radius finds markers at exactly the center
#[test]
fn test_zero_radius() {
    let mut index = GeohashIndex::new();
    let spot = Coordinate::new(-33.8688, 151.2093);
    index.insert(Marker::new("here", spot, ""), 8).expect("insert");
    index
        .insert(Marker::new("near", Coordinate::new(-33.8689, 151.2093), ""), 8)
        .expect("insert");

    let found = index.search(&spot, 0.0, 8).expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "here");
}

/// Test 5: metadata rides along untouched
#[test]
fn test_marker_metadata_preserved() {
    let mut index = GeohashIndex::new();
    let marker = Marker::new("run", Coordinate::new(42.6, -5.6), "Track entrance")
        .with_owner("user-1")
        .with_visibility(Visibility::Public);
    index.insert(marker.clone(), 7).expect("insert");

    let found = index.search(&Coordinate::new(42.6, -5.6), 0.1, 7).expect("search");
    assert_eq!(found, vec![&marker]);
}

/// Test 6: visibility filtering is left to the caller
#[test]
fn test_caller_side_visibility_filter() {
    let mut index = GeohashIndex::new();
    let c = Coordinate::new(42.6, -5.6);
    index
        .insert(Marker::new("mine", c, "").with_owner("alice"), 7)
        .expect("insert");
    index
        .insert(Marker::new("theirs", c, "").with_owner("bob"), 7)
        .expect("insert");
    index
        .insert(
            Marker::new("shared", c, "")
                .with_owner("bob")
                .with_visibility(Visibility::Public),
            7,
        )
        .expect("insert");

    let found = index.search(&c, 1.0, 7).expect("search");
    assert_eq!(found.len(), 3);

    let visible: Vec<&str> = found
        .iter()
        .filter(|m| m.is_visible_to("alice"))
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(visible, vec!["mine", "shared"]);
}

/// Test 7: invalid queries surface errors instead of empty results
#[test]
fn test_invalid_queries() {
    let index = GeohashIndex::new();
    assert!(matches!(
        index.search(&Coordinate::new(0.0, 0.0), -5.0, 5),
        Err(GeomarkError::InvalidInput(_))
    ));
    assert!(matches!(
        index.search(&Coordinate::new(0.0, 200.0), 5.0, 5),
        Err(GeomarkError::OutOfRange(_))
    ));
}

/// Test 8: a traversal limit turns an oversized covering into an error
#[test]
fn test_traversal_limit_from_config() {
    let config = Config::from_json(r#"{ "geohash_precision": 7, "max_covering_cells": 1000 }"#)
        .expect("config");
    let index = GeohashIndex::with_config(config).expect("index");

    assert!(index.nearby(&Coordinate::new(10.0, 10.0), 0.01).is_ok());
    assert!(matches!(
        index.nearby(&Coordinate::new(10.0, 10.0), 1_000.0),
        Err(GeomarkError::QueryTooBroad { limit: 1000 })
    ));
}
