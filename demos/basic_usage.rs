//! Basic usage example for geobed-rs
//!
//! This example demonstrates how to:
//! - Load the bundled catalog (cached per process)
//! - Reverse geocode a handful of coordinates
//! - Join a result to its country metadata
//!
//! Build the assets first:
//!   cargo run -p geobed-cli -- build --source-dir <dir with GeoNames dumps>

use geobed_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== GeoBed-RS Basic Usage Example ===\n");

    println!("Loading catalog...");
    let catalog = build_catalog()?;
    let stats = catalog.stats();
    println!(
        "✓ Catalog loaded: {} cities, {} countries\n",
        stats.cities, stats.countries
    );

    let queries = [
        ("Zurich", 47.3769, 8.5417),
        ("New York", 40.7128, -74.0060),
        ("Tokyo", 35.6762, 139.6503),
        ("Sydney", -33.8688, 151.2093),
        ("Mid-Pacific", 0.0, -160.0),
    ];

    for (label, lat, lon) in queries {
        match resolve(catalog, lat, lon) {
            Some(city) => {
                let country = catalog
                    .country_of(city)
                    .map(|c| c.name())
                    .unwrap_or("?");
                println!(
                    "{label:>12}: {}, {} ({country}) pop. {}",
                    city.name(),
                    city.region(),
                    city.population()
                );
            }
            None => println!("{label:>12}: no match"),
        }
    }

    // A resolver can be reused; it holds no state besides the catalog.
    let resolver = Resolver::new(catalog);
    let hits = (0..10)
        .filter(|i| resolver.resolve(45.0 + *i as f64, 7.0).is_some())
        .count();
    println!("\n{hits}/10 points along 7°E resolved to a city");

    Ok(())
}
