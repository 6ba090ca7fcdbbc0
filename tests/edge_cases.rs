use geomark::compute::index::brute_force_search;
use geomark::{BoundingBox, Coordinate, GeohashIndex, GeomarkError, Marker, geohash};

fn ids(markers: &[&Marker]) -> Vec<String> {
    let mut ids: Vec<String> = markers.iter().map(|m| m.id.clone()).collect();
    ids.sort();
    ids
}

/// Test 1: hashes agree with the `geohash` crate away from cell edges
#[test]
fn test_encode_matches_reference_crate() {
    let points = [
        (40.7128, -74.0060),
        (-33.8688, 151.2093),
        (35.6895, 139.6917),
        (64.1466, -21.9426),
        (-54.8019, -68.3030),
        (1.3521, 103.8198),
        (42.6, -5.6),
    ];

    for (lat, lon) in points {
        for precision in 1..=12 {
            let ours = geohash::encode(&Coordinate::new(lat, lon), precision).expect("encode");
            let theirs =
                ::geohash::encode(::geohash::Coord { x: lon, y: lat }, precision).expect("encode");
            assert_eq!(ours, theirs, "({lat}, {lon}) at precision {precision}");
        }
    }
}

/// Test 2: cell bounds agree with the `geohash` crate
#[test]
fn test_bounding_box_matches_reference_crate() {
    for hash in ["e", "ezs42", "dr5regw3", "u4pruydqqvj", "0", "zzzzzz", "7zzzz"] {
        let ours = geohash::bounding_box(hash).expect("bbox");
        let theirs = BoundingBox::from(::geohash::decode_bbox(hash).expect("bbox"));

        assert!((ours.min_latitude() - theirs.min_latitude()).abs() < 1e-9, "{hash}");
        assert!((ours.max_latitude() - theirs.max_latitude()).abs() < 1e-9, "{hash}");
        assert!((ours.min_longitude() - theirs.min_longitude()).abs() < 1e-9, "{hash}");
        assert!((ours.max_longitude() - theirs.max_longitude()).abs() < 1e-9, "{hash}");
    }
}

/// Test 3: searches reach across the antimeridian
#[test]
fn test_antimeridian_search() {
    let mut index = GeohashIndex::new();
    let markers = [
        ("east", 0.0, 179.99),
        ("west", 0.0, -179.99),
        ("dateline", 0.01, 180.0),
        ("far", 0.0, 178.0),
    ];
    for (id, lat, lon) in markers {
        index
            .insert(Marker::new(id, Coordinate::new(lat, lon), ""), 6)
            .expect("insert");
    }

    for center in [Coordinate::new(0.0, 180.0), Coordinate::new(0.0, -179.995)] {
        let found = index.search(&center, 5.0, 6).expect("search");
        assert_eq!(ids(&found), vec!["dateline", "east", "west"], "{center:?}");
    }
}

/// Test 4: circles that reach a pole cover every longitude
#[test]
fn test_polar_search() {
    let mut index = GeohashIndex::new();
    let markers = [
        ("a", 89.8, 0.0),
        ("b", 89.8, 120.0),
        ("c", 89.8, -170.0),
        ("pole", 90.0, 0.0),
        ("distant", 89.0, 45.0),
        ("south", -89.8, 0.0),
    ];
    for (id, lat, lon) in markers {
        index
            .insert(Marker::new(id, Coordinate::new(lat, lon), ""), 4)
            .expect("insert");
    }

    let found = index
        .search(&Coordinate::new(90.0, 0.0), 50.0, 4)
        .expect("search");
    assert_eq!(ids(&found), vec!["a", "b", "c", "pole"]);

    let found = index
        .search(&Coordinate::new(89.9, 10.0), 35.0, 4)
        .expect("search");
    let expected = brute_force_search(index.markers(), &Coordinate::new(89.9, 10.0), 35.0);
    assert_eq!(ids(&found), ids(&expected));
    assert!(ids(&found).contains(&"c".to_string()));

    let found = index
        .search(&Coordinate::new(-90.0, 0.0), 50.0, 4)
        .expect("search");
    assert_eq!(ids(&found), vec!["south"]);
}

/// Test 5: world corners encode and search without panicking
#[test]
fn test_extreme_coordinates() {
    let mut index = GeohashIndex::new();
    let corners = [(90.0, 180.0), (90.0, -180.0), (-90.0, 180.0), (-90.0, -180.0)];
    for (i, (lat, lon)) in corners.into_iter().enumerate() {
        index
            .insert(Marker::new(format!("c{i}"), Coordinate::new(lat, lon), ""), 3)
            .expect("insert");
    }

    let found = index
        .search(&Coordinate::new(90.0, 0.0), 1.0, 3)
        .expect("search");
    assert_eq!(ids(&found), vec!["c0", "c1"]);
}

/// Test 6: empty hash and whole-world precision
#[test]
fn test_precision_zero() {
    let mut index = GeohashIndex::new();
    let key = index
        .insert(Marker::new("any", Coordinate::new(12.0, 34.0), ""), 0)
        .expect("insert");
    assert_eq!(key, "");
    assert_eq!(index.lookup("").len(), 1);

    let found = index
        .search(&Coordinate::new(12.0, 34.1), 20.0, 0)
        .expect("search");
    assert_eq!(found.len(), 1);
}

/// Test 7: malformed hashes are rejected with the offending character
#[test]
fn test_invalid_hashes() {
    let cases = [("a", 'a', 0), ("ezl", 'l', 2), ("9o", 'o', 1), ("dr5 ", ' ', 3)];
    for (hash, bad, position) in cases {
        match geohash::decode(hash) {
            Err(GeomarkError::InvalidCharacter { character, position: at }) => {
                assert_eq!(character, bad);
                assert_eq!(at, position);
            }
            other => panic!("{hash:?} decoded to {other:?}"),
        }
    }
}
