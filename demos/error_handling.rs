//! Error handling example for geobed-rs
//!
//! Load failures are errors; "nothing matched" is not.

use geobed_rs::prelude::*;
use std::path::Path;

fn main() -> Result<()> {
    println!("=== GeoBed-RS Error Handling Example ===\n");

    // Example 1: a directory without assets
    println!("--- Example 1: Loading from a missing directory ---");
    match Catalog::load_from_dir(Path::new("/definitely/not/here")) {
        Ok(_) => println!("  unexpected: catalog loaded"),
        Err(GeoError::NotFound(msg)) => println!("  ✗ not found: {msg}"),
        Err(e) => println!("  ✗ other error: {e}"),
    }
    println!();

    // Example 2: records that break the geohash invariant
    println!("--- Example 2: Rejecting malformed records ---");
    let mut broken = City::<DefaultBackend>::new("Broken", "XX", 10.0, 10.0)?;
    broken.geohash = "s1".to_string();
    match Catalog::from_parts(vec![broken], Vec::new(), None) {
        Ok(_) => println!("  unexpected: catalog accepted"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 3: no match is a value, not an error
    println!("--- Example 3: Queries without a match ---");
    let bern =
        City::<DefaultBackend>::new("Bern", "CH", 46.94809, 7.44744)?.with_population(121_631);
    let catalog = Catalog::from_parts(vec![bern], Vec::new(), None)?;
    for (lat, lon) in [(46.95, 7.45), (0.0, 0.0), (-33.87, 151.21), (f64::NAN, 1.0)] {
        match resolve(&catalog, lat, lon) {
            Some(city) => println!("  ({lat}, {lon}) -> {}", city.name()),
            None => println!("  ({lat}, {lon}) -> no match"),
        }
    }

    Ok(())
}
