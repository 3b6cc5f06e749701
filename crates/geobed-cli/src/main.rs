//! geobed-cli: dataset tooling for geobed-core
//!
//! Builds the binary catalog assets from GeoNames dumps and inspects an
//! existing catalog. Reverse geocoding itself lives in the library.
//!
//! Usage examples
//! --------------
//!
//! - Build assets from a directory of GeoNames dumps
//!   $ geobed-cli --data-dir ./data build --source-dir ./dumps
//!
//! - Show overall stats
//!   $ geobed-cli stats
//!   $ geobed-cli stats --json
//!
//! - Show details for a country by code (ISO2 or ISO3, case-insensitive)
//!   $ geobed-cli country ch
//!   $ geobed-cli country che --json
//!
//! Log verbosity follows `RUST_LOG`; without it `-v` / `-vv` raise the level.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use geobed_core::{Catalog, StandardBackend};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let data_dir: PathBuf = args
        .data_dir
        .unwrap_or_else(Catalog::<StandardBackend>::default_data_dir);

    match args.command {
        Commands::Build { source_dir } => build(&source_dir, &data_dir)?,

        Commands::Stats { json } => {
            let catalog = load(&data_dir)?;
            let stats = catalog.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Catalog statistics:");
                println!("  Countries: {}", stats.countries);
                println!("  Cities: {}", stats.cities);
                println!("  Name prefixes: {}", stats.name_prefixes);
            }
        }

        Commands::Country { code, json } => {
            let catalog = load(&data_dir)?;
            match catalog.find_country_by_code(&code) {
                Some(c) if json => println!("{}", serde_json::to_string_pretty(c)?),
                Some(c) => {
                    println!("Country: {}", c.name());
                    println!("ISO2: {}", c.iso2());
                    println!("ISO3: {}", c.iso3());
                    println!("Capital: {}", c.capital());
                    println!("Continent: {}", c.continent());
                    println!("Population: {}", c.population);
                    println!("Area (km²): {}", c.area);
                    println!("Phone Code: +{}", c.phone_code());
                    println!("Currency: {} ({})", c.currency(), c.currency_name);
                    println!("Languages: {}", c.languages().collect::<Vec<_>>().join(", "));
                    println!("Neighbours: {}", c.neighbours().collect::<Vec<_>>().join(", "));
                }
                None => eprintln!("No country found for: {code}"),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(data_dir: &std::path::Path) -> anyhow::Result<Catalog<StandardBackend>> {
    Catalog::load_from_dir(data_dir)
        .with_context(|| format!("failed to load catalog from {}", data_dir.display()))
}

#[cfg(feature = "builder")]
fn build(source_dir: &std::path::Path, data_dir: &std::path::Path) -> anyhow::Result<()> {
    use geobed_core::loader::builder::{build_assets, GeoNamesSources};

    let sources = GeoNamesSources::in_dir(source_dir);
    let report = build_assets(&sources, data_dir)
        .with_context(|| format!("failed to build assets from {}", source_dir.display()))?;

    println!("Wrote {}", report.outputs.cities.display());
    println!("Wrote {}", report.outputs.countries.display());
    println!("Wrote {}", report.outputs.city_name_idx.display());
    println!(
        "{} cities, {} countries, {} name prefixes ({} rows skipped)",
        report.cities, report.countries, report.name_prefixes, report.skipped_rows
    );
    Ok(())
}

#[cfg(not(feature = "builder"))]
fn build(_source_dir: &std::path::Path, _data_dir: &std::path::Path) -> anyhow::Result<()> {
    anyhow::bail!("this binary was built without the 'builder' feature")
}
