#![allow(dead_code)]

use geobed_core::{Catalog, City, Country, DefaultBackend, SpatialEncoder};

/// Encoder that ignores the coordinate and always yields the same hash.
pub struct FixedEncoder {
    pub hash: String,
    pub sentinel: String,
}

impl FixedEncoder {
    pub fn new(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            sentinel: "7zzzzzzzzzzz".to_string(),
        }
    }
}

impl SpatialEncoder for FixedEncoder {
    fn encode(&self, _latitude: f64, _longitude: f64) -> Option<String> {
        Some(self.hash.clone())
    }

    fn unset_sentinel(&self) -> &str {
        &self.sentinel
    }
}

/// A city with an explicit geohash; coordinates are irrelevant for
/// resolver tests driven by [`FixedEncoder`].
pub fn city(name: &str, hash: &str, population: u32) -> City<DefaultBackend> {
    City {
        name: name.to_string(),
        alt_name: String::new(),
        country: "CH".to_string(),
        region: String::new(),
        latitude: 0.0,
        longitude: 0.0,
        population,
        geohash: hash.to_string(),
    }
}

pub fn country(iso2: &str, iso3: &str, name: &str) -> Country<DefaultBackend> {
    Country {
        name: name.to_string(),
        capital: String::new(),
        area: 0,
        population: 0,
        geoname_id: 0,
        iso_numeric: 0,
        iso2: iso2.to_string(),
        iso3: iso3.to_string(),
        fips: String::new(),
        continent: "EU".to_string(),
        tld: String::new(),
        currency_code: String::new(),
        currency_name: String::new(),
        phone: String::new(),
        postal_code_format: String::new(),
        postal_code_regex: String::new(),
        languages: String::new(),
        neighbours: String::new(),
        equivalent_fips_code: String::new(),
    }
}

pub fn catalog(cities: Vec<City<DefaultBackend>>) -> Catalog<DefaultBackend> {
    Catalog::from_parts(cities, vec![country("CH", "CHE", "Switzerland")], None)
        .expect("well-formed test catalog")
}

/// A few real Swiss cities hashed with the production encoder.
pub fn swiss_cities() -> Vec<City<DefaultBackend>> {
    vec![
        City::new("Zurich", "CH", 47.36667, 8.55)
            .unwrap()
            .with_region("Zurich")
            .with_population(341_730),
        City::new("Geneva", "CH", 46.20222, 6.14569)
            .unwrap()
            .with_region("Geneva")
            .with_population(183_981),
        City::new("Bern", "CH", 46.94809, 7.44744)
            .unwrap()
            .with_region("Bern")
            .with_population(121_631),
        City::new("Lugano", "CH", 46.01008, 8.96004)
            .unwrap()
            .with_region("Ticino")
            .with_population(63_185),
    ]
}
