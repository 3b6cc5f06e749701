// crates/geobed-core/src/loader/builder.rs
#![cfg(feature = "builder")]

//! Turns GeoNames text dumps into the binary assets the loader reads.
//!
//! Inputs, looked up inside a source directory (plain or `.gz`):
//!
//! - `cities1000.txt` - one populated place per line, 19 tab-separated columns
//! - `countryInfo.txt` - one country per line, `#` starts a comment
//! - `admin1CodesASCII.txt` - optional, turns admin1 codes into region names
//!
//! Rows that cannot be parsed are skipped and counted; a file that cannot be
//! read fails the whole build.

use super::common_io::{open_stream, CompressionMode};
use super::DataSources;
use crate::catalog::Catalog;
use crate::error::{GeoError, Result};
use crate::model::{sort_by_name, City, CityNameIndex, Country};
use crate::traits::{DefaultBackend, GeoBackend};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CITIES_SOURCE: &str = "cities1000.txt";
pub const COUNTRIES_SOURCE: &str = "countryInfo.txt";
pub const ADMIN1_SOURCE: &str = "admin1CodesASCII.txt";

// cities1000.txt columns
const C_NAME: usize = 1;
const C_ALT_NAMES: usize = 3;
const C_LAT: usize = 4;
const C_LON: usize = 5;
const C_COUNTRY: usize = 8;
const C_ADMIN1: usize = 10;
const C_POPULATION: usize = 14;

// countryInfo.txt needs at least up to the geonameid column.
const COUNTRY_MIN_COLUMNS: usize = 17;

/// GeoNames dump files to build from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoNamesSources {
    pub cities: PathBuf,
    pub countries: PathBuf,
    pub admin1: Option<PathBuf>,
}

impl GeoNamesSources {
    /// Finds the dumps in `dir`, preferring a `.gz` variant when both exist.
    /// The admin1 file is only used when present.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let admin1 = pick(dir, ADMIN1_SOURCE);
        Self {
            cities: pick(dir, CITIES_SOURCE),
            countries: pick(dir, COUNTRIES_SOURCE),
            admin1: admin1.exists().then_some(admin1),
        }
    }
}

fn pick(dir: &Path, name: &str) -> PathBuf {
    let gz = dir.join(format!("{name}.gz"));
    if gz.exists() {
        gz
    } else {
        dir.join(name)
    }
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub outputs: DataSources,
    pub cities: usize,
    pub countries: usize,
    pub name_prefixes: usize,
    /// City and country rows that could not be parsed.
    pub skipped_rows: usize,
}

/// Parse the dumps and write the three assets into `out_dir`.
pub fn build_assets(sources: &GeoNamesSources, out_dir: &Path) -> Result<BuildReport> {
    info!(source = %sources.cities.display(), out = %out_dir.display(), "building catalog assets");

    let (catalog, skipped_rows) = build_catalog_from_sources(sources)?;
    let outputs = catalog.save_to_dir(out_dir)?;

    let stats = catalog.stats();
    info!(
        cities = stats.cities,
        countries = stats.countries,
        name_prefixes = stats.name_prefixes,
        "assets written"
    );

    Ok(BuildReport {
        outputs,
        cities: stats.cities,
        countries: stats.countries,
        name_prefixes: stats.name_prefixes,
        skipped_rows,
    })
}

/// Parse the dumps into a catalog without writing anything. Also returns the
/// number of skipped rows.
pub fn build_catalog_from_sources(
    sources: &GeoNamesSources,
) -> Result<(Catalog<DefaultBackend>, usize)> {
    let admin1 = match &sources.admin1 {
        Some(path) => {
            let map = parse_admin1(BufReader::new(open_source(path)?))?;
            debug!(regions = map.len(), "loaded admin1 names");
            map
        }
        None => HashMap::new(),
    };

    let (cities, skipped_cities) =
        parse_cities::<DefaultBackend>(BufReader::new(open_source(&sources.cities)?), &admin1)?;
    info!(cities = cities.len(), skipped = skipped_cities, "parsed cities");

    let (countries, skipped_countries) =
        parse_countries::<DefaultBackend>(BufReader::new(open_source(&sources.countries)?))?;
    info!(countries = countries.len(), skipped = skipped_countries, "parsed countries");

    let skipped_rows = skipped_cities + skipped_countries;
    if skipped_rows > 0 {
        warn!(skipped_rows, "some source rows could not be parsed");
    }

    Ok((assemble(cities, countries)?, skipped_rows))
}

/// Sort cities by folded name and attach a freshly built name index.
///
/// The sort is stable, so cities with the same folded name keep their dump
/// order; that order is also the resolver's final tie-break.
pub fn assemble<B: GeoBackend>(
    mut cities: Vec<City<B>>,
    countries: Vec<Country<B>>,
) -> Result<Catalog<B>> {
    sort_by_name(&mut cities);
    let index = CityNameIndex::build(&cities);
    Catalog::from_parts(cities, countries, Some(index))
}

fn open_source(path: &Path) -> Result<Box<dyn Read>> {
    open_stream(path, CompressionMode::for_path(path))
}

/// `admin1CodesASCII.txt`: `CC.code \t name \t ascii name \t geonameid`.
pub fn parse_admin1(reader: impl BufRead) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split('\t');
        if let (Some(code), Some(name)) = (parts.next(), parts.next()) {
            if !code.is_empty() {
                map.insert(code.to_string(), name.to_string());
            }
        }
    }
    Ok(map)
}

/// `cities1000.txt` rows into cities. Returns the cities in file order and the
/// number of rows that were skipped.
pub fn parse_cities<B: GeoBackend>(
    reader: impl BufRead,
    admin1: &HashMap<String, String>,
) -> Result<(Vec<City<B>>, usize)> {
    let mut cities = Vec::new();
    let mut skipped = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_city_row(&line, admin1) {
            Some(city) => cities.push(city),
            None => {
                debug!(line = line_no + 1, "skipping malformed city row");
                skipped += 1;
            }
        }
    }
    Ok((cities, skipped))
}

fn parse_city_row<B: GeoBackend>(line: &str, admin1: &HashMap<String, String>) -> Option<City<B>> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() <= C_POPULATION {
        return None;
    }

    let name = parts[C_NAME].trim();
    if name.is_empty() {
        return None;
    }
    let lat: f64 = parts[C_LAT].trim().parse().ok()?;
    let lon: f64 = parts[C_LON].trim().parse().ok()?;
    let country = parts[C_COUNTRY].trim();
    let admin1_code = parts[C_ADMIN1].trim();
    let population = parts[C_POPULATION].trim().parse::<u64>().unwrap_or(0);

    let region = admin1
        .get(&format!("{country}.{admin1_code}"))
        .map(String::as_str)
        .unwrap_or(admin1_code);

    let city = City::new(name, country, lat, lon)
        .ok()?
        .with_alt_name(parts[C_ALT_NAMES].trim())
        .with_region(region)
        .with_population(u32::try_from(population).unwrap_or(u32::MAX));
    Some(city)
}

/// `countryInfo.txt` rows into countries. Comment lines start with `#`.
pub fn parse_countries<B: GeoBackend>(reader: impl BufRead) -> Result<(Vec<Country<B>>, usize)> {
    let mut countries = Vec::new();
    let mut skipped = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        match parse_country_row(&line) {
            Some(country) => countries.push(country),
            None => {
                debug!(line = line_no + 1, "skipping malformed country row");
                skipped += 1;
            }
        }
    }

    if countries.is_empty() {
        return Err(GeoError::InvalidData(
            "country source contains no usable rows".into(),
        ));
    }
    Ok((countries, skipped))
}

fn parse_country_row<B: GeoBackend>(line: &str) -> Option<Country<B>> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < COUNTRY_MIN_COLUMNS {
        return None;
    }
    let col = |i: usize| B::str_from(parts.get(i).map_or("", |s| s.trim()));
    let num = |i: usize| parts[i].trim().parse::<f64>().map_or(0, |v| v as u32);

    if parts[0].trim().len() != 2 {
        return None;
    }

    Some(Country {
        iso2: col(0),
        iso3: col(1),
        iso_numeric: parts[2].trim().parse().unwrap_or(0),
        fips: col(3),
        name: col(4),
        capital: col(5),
        area: num(6),
        population: num(7),
        continent: col(8),
        tld: col(9),
        currency_code: col(10),
        currency_name: col(11),
        phone: col(12),
        postal_code_format: col(13),
        postal_code_regex: col(14),
        languages: col(15),
        geoname_id: num(16),
        neighbours: col(17),
        equivalent_fips_code: col(18),
    })
}
