// crates/geobed-core/src/model.rs
use crate::error::{GeoError, Result};
use crate::spatial::encode_clamped;
use crate::text::{fold_key, folded_prefix};
use crate::traits::GeoBackend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A populated place.
///
/// `geohash` is computed once when the dataset is built and never
/// recomputed at query time. It is always
/// [`HASH_LEN`](crate::spatial::HASH_LEN) characters long.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City<B: GeoBackend> {
    pub name: B::Str,
    /// Alternate spellings, comma separated. May be empty.
    pub alt_name: B::Str,
    /// ISO 3166-1 alpha-2 code of the owning country.
    pub country: B::Str,
    pub region: B::Str,
    pub latitude: B::Float,
    pub longitude: B::Float,
    pub population: u32,
    pub geohash: B::Str,
}

impl<B: GeoBackend> City<B> {
    /// Create a city at the given coordinate, hashing it with the same
    /// primitive the resolver uses for queries.
    ///
    /// ```rust
    /// use geobed_core::{City, DefaultBackend};
    ///
    /// let bern = City::<DefaultBackend>::new("Bern", "CH", 46.94809, 7.44744)
    ///     .unwrap()
    ///     .with_population(121_631);
    /// assert_eq!(bern.geohash().len(), 12);
    /// ```
    pub fn new(name: &str, country: &str, latitude: f64, longitude: f64) -> Result<Self> {
        let geohash = encode_clamped(latitude, longitude).ok_or_else(|| {
            GeoError::InvalidData(format!(
                "cannot encode coordinate ({latitude}, {longitude}) for {name}"
            ))
        })?;
        Ok(Self {
            name: B::str_from(name),
            alt_name: B::str_from(""),
            country: B::str_from(country),
            region: B::str_from(""),
            latitude: B::float_from(latitude),
            longitude: B::float_from(longitude),
            population: 0,
            geohash: B::str_from(&geohash),
        })
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = B::str_from(region);
        self
    }

    pub fn with_alt_name(mut self, alt_name: &str) -> Self {
        self.alt_name = B::str_from(alt_name);
        self
    }

    pub fn with_population(mut self, population: u32) -> Self {
        self.population = population;
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn alt_name(&self) -> &str {
        self.alt_name.as_ref()
    }

    /// ISO2 code of the country this city belongs to.
    pub fn country_code(&self) -> &str {
        self.country.as_ref()
    }

    pub fn region(&self) -> &str {
        self.region.as_ref()
    }

    pub fn latitude(&self) -> f64 {
        B::float_to_f64(self.latitude)
    }

    pub fn longitude(&self) -> f64 {
        B::float_to_f64(self.longitude)
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn geohash(&self) -> &str {
        self.geohash.as_ref()
    }
}

/// A country entry.
///
/// Auxiliary metadata joined to cities by [`Country::iso2`]. The resolver
/// never looks at it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country<B: GeoBackend> {
    pub name: B::Str,
    pub capital: B::Str,
    /// Area in square kilometres.
    pub area: u32,
    pub population: u32,
    pub geoname_id: u32,
    pub iso_numeric: u16,
    pub iso2: B::Str,
    pub iso3: B::Str,
    pub fips: B::Str,
    /// Two-letter continent code (e.g. "EU").
    pub continent: B::Str,
    pub tld: B::Str,
    pub currency_code: B::Str,
    pub currency_name: B::Str,
    /// Dialing prefix without the leading `+`.
    pub phone: B::Str,
    pub postal_code_format: B::Str,
    pub postal_code_regex: B::Str,
    /// Comma separated language tags (e.g. "de-CH,fr-CH,it-CH,rm").
    pub languages: B::Str,
    /// Comma separated ISO2 codes of neighbouring countries.
    pub neighbours: B::Str,
    pub equivalent_fips_code: B::Str,
}

impl<B: GeoBackend> Country<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn iso2(&self) -> &str {
        self.iso2.as_ref()
    }

    pub fn iso3(&self) -> &str {
        self.iso3.as_ref()
    }

    pub fn capital(&self) -> &str {
        self.capital.as_ref()
    }

    pub fn continent(&self) -> &str {
        self.continent.as_ref()
    }

    pub fn currency(&self) -> &str {
        self.currency_code.as_ref()
    }

    pub fn phone_code(&self) -> &str {
        self.phone.as_ref()
    }

    /// Neighbouring country codes, split.
    pub fn neighbours(&self) -> impl Iterator<Item = &str> {
        self.neighbours
            .as_ref()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Language tags, split.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .as_ref()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Stable sort by folded name, the order [`CityNameIndex`] is built over.
/// Cities with the same folded name keep their relative order.
pub fn sort_by_name<B: GeoBackend>(cities: &mut [City<B>]) {
    cities.sort_by_cached_key(|c| fold_key(c.name()));
}

/// Index over the name-sorted city sequence.
///
/// Keys are the folded one- and two-character prefixes of city names; each
/// maps to the **last** offset in the sorted sequence whose name carries that
/// prefix. Only meaningful for a city list sorted by [`fold_key`](crate::text::fold_key).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CityNameIndex {
    entries: BTreeMap<String, u32>,
}

impl CityNameIndex {
    /// Build the index from a city sequence that is already sorted by
    /// folded name.
    pub fn build<B: GeoBackend>(cities: &[City<B>]) -> Self {
        let mut entries = BTreeMap::new();
        for (offset, city) in cities.iter().enumerate() {
            for n in 1..=2 {
                if let Some(key) = folded_prefix(city.name(), n) {
                    let slot = entries.entry(key).or_insert(offset as u32);
                    if *slot < offset as u32 {
                        *slot = offset as u32;
                    }
                }
            }
        }
        Self { entries }
    }

    /// Last offset of a city whose folded name starts with `prefix`.
    pub fn last_offset(&self, prefix: &str) -> Option<usize> {
        self.entries.get(prefix).map(|&o| o as usize)
    }

    /// Number of indexed prefixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v as usize))
    }

    /// Checks that every offset points inside a city list of `city_count`.
    pub(crate) fn check_bounds(&self, city_count: usize) -> Result<()> {
        match self.entries.iter().find(|&(_, &o)| o as usize >= city_count) {
            Some((key, offset)) => Err(GeoError::InvalidData(format!(
                "name index entry {key:?} points at offset {offset}, but only {city_count} cities are loaded"
            ))),
            None => Ok(()),
        }
    }
}

/// Simple aggregate statistics for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub cities: usize,
    /// Number of name-index prefixes, 0 when no index is loaded.
    pub name_prefixes: usize,
}
