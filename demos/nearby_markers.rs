use geomark::validation::MarkerDraft;
use geomark::{Config, Coordinate, GeohashIndex, geohash};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see traversal summaries)
    env_logger::init();

    println!("=== geomark - Nearby Markers ===\n");

    // === GEOHASH CODEC ===
    println!("1. Geohash Codec");
    println!("----------------");

    let leon = Coordinate::new(42.6, -5.6);
    for precision in [1, 3, 5, 7] {
        let hash = geohash::encode(&leon, precision)?;
        let cell = geohash::bounding_box(&hash)?;
        println!(
            "   precision {}: {:<8} lat [{:.5}, {:.5}] lon [{:.5}, {:.5}]",
            precision,
            hash,
            cell.min_latitude(),
            cell.max_latitude(),
            cell.min_longitude(),
            cell.max_longitude()
        );
    }
    println!();

    // === MARKER ENTRY ===
    println!("2. Marker Entry");
    println!("---------------");

    let mut index = GeohashIndex::with_config(Config::default())?;

    let drafts = [
        MarkerDraft::new("Outdoor gym", "42.6034", "-5.5812").public(true),
        MarkerDraft::new("Running track", "42.5890", "-5.5601"),
        MarkerDraft::new("Climbing wall", "42.8782", "-8.5448").public(true),
        MarkerDraft::new("Broken form", "42,6", "-5.6"),
        MarkerDraft::new("", "42.6", "-5.6"),
    ];

    for draft in drafts {
        let note = draft.note.clone();
        match draft.into_marker("user-1") {
            Ok(marker) => {
                let key = index.insert_marker(marker)?;
                println!("   Stored {:?} under {}", note, key);
            }
            Err(e) => println!("   Rejected {:?}: {}", note, e),
        }
    }
    println!();

    // === RADIUS SEARCH ===
    println!("3. Radius Search");
    println!("----------------");

    for radius in [1.0, 5.0, 30.0] {
        let (found, stats) = index.search_with_stats(&leon, radius, 7)?;
        println!(
            "   {:>5} km: {} markers ({} cells, {} candidates)",
            radius,
            found.len(),
            stats.cells_covered,
            stats.candidates_examined
        );
        for marker in found {
            println!(
                "     - {} ({:.2} km)",
                marker.note,
                geomark::haversine_km(&leon, &marker.coordinate)
            );
        }
    }
    println!();

    // === STATISTICS ===
    let stats = index.stats();
    println!(
        "Index holds {} markers in {} buckets",
        stats.marker_count, stats.bucket_count
    );

    Ok(())
}
