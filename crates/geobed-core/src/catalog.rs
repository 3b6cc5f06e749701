// crates/geobed-core/src/catalog.rs
use crate::error::{GeoError, Result};
use crate::model::{City, CityNameIndex, Country, DbStats};
use crate::spatial::{is_well_formed, HASH_LEN};
use crate::traits::GeoBackend;

/// The loaded, immutable collection of cities and countries.
///
/// A catalog is built once (see [`Catalog::load`]) and only ever read
/// afterwards, so a single instance can be shared across threads without
/// locking.
#[derive(Clone, Debug)]
pub struct Catalog<B: GeoBackend> {
    cities: Vec<City<B>>,
    countries: Vec<Country<B>>,
    name_index: Option<CityNameIndex>,
}

impl<B: GeoBackend> Catalog<B> {
    /// Assemble a catalog from already-decoded records.
    ///
    /// Fails with [`GeoError::InvalidData`] if any city carries a geohash that
    /// is not exactly [`HASH_LEN`] characters long, or if the name index
    /// points past the end of the city list. Nothing is returned on failure.
    pub fn from_parts(
        cities: Vec<City<B>>,
        countries: Vec<Country<B>>,
        name_index: Option<CityNameIndex>,
    ) -> Result<Self> {
        if let Some((pos, bad)) = cities
            .iter()
            .enumerate()
            .find(|(_, c)| !is_well_formed(c.geohash()))
        {
            return Err(GeoError::InvalidData(format!(
                "city #{pos} ({}) has geohash {:?}, expected {HASH_LEN} characters",
                bad.name(),
                bad.geohash()
            )));
        }
        if let Some(index) = &name_index {
            index.check_bounds(cities.len())?;
        }
        Ok(Self {
            cities,
            countries,
            name_index,
        })
    }

    /// All cities, in dataset order.
    pub fn cities(&self) -> &[City<B>] {
        &self.cities
    }

    pub fn countries(&self) -> &[Country<B>] {
        &self.countries
    }

    /// The name-prefix index, if one was loaded with this catalog.
    pub fn name_index(&self) -> Option<&CityNameIndex> {
        self.name_index.as_ref()
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            countries: self.countries.len(),
            cities: self.cities.len(),
            name_prefixes: self.name_index.as_ref().map_or(0, CityNameIndex::len),
        }
    }

    pub fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country<B>> {
        // Linear scan of countries is fast (N < 300)
        self.countries
            .iter()
            .find(|c| c.iso2().eq_ignore_ascii_case(iso2))
    }

    /// Looks up a country by ISO2 first, then ISO3. Case-insensitive.
    pub fn find_country_by_code(&self, code: &str) -> Option<&Country<B>> {
        let code = code.trim();
        self.find_country_by_iso2(code).or_else(|| {
            self.countries
                .iter()
                .find(|c| c.iso3().eq_ignore_ascii_case(code))
        })
    }

    /// The country a city belongs to.
    pub fn country_of(&self, city: &City<B>) -> Option<&Country<B>> {
        self.find_country_by_iso2(city.country_code())
    }
}
