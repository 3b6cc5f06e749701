// crates/geobed-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) for the three packaged
//! assets and hands the decoded records to [`Catalog::from_parts`].
//!
//! | asset | content |
//! |---|---|
//! | `cities.bin.gz` (`cities.bin` without `compact`) | `Vec<City>` |
//! | `countries.bin` | `Vec<Country>` |
//! | `city_name_idx.bin` | [`CityNameIndex`] |
//!
//! Loading is all-or-nothing: if any asset is missing, unreadable or does not
//! decode, no catalog is produced.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::loader::common_io::CompressionMode;
use crate::model::{sort_by_name, City, CityNameIndex, Country};
use crate::traits::DefaultBackend;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod common_io;

#[cfg(feature = "builder")]
pub mod builder;

#[cfg(feature = "compact")]
pub const CITY_DATA_FILENAME: &str = "cities.bin.gz";
#[cfg(not(feature = "compact"))]
pub const CITY_DATA_FILENAME: &str = "cities.bin";

pub const COUNTRY_DATA_FILENAME: &str = "countries.bin";
pub const CITY_NAME_IDX_FILENAME: &str = "city_name_idx.bin";

// Single in-process cache so the default dataset is decoded once per process.
static CATALOG_CACHE: OnceCell<Catalog<DefaultBackend>> = OnceCell::new();

/// Locations of the three packaged data sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub cities: PathBuf,
    pub countries: PathBuf,
    pub city_name_idx: PathBuf,
}

impl DataSources {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            cities: dir.join(CITY_DATA_FILENAME),
            countries: dir.join(COUNTRY_DATA_FILENAME),
            city_name_idx: dir.join(CITY_NAME_IDX_FILENAME),
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::in_dir(Catalog::default_data_dir())
    }
}

impl CityNameIndex {
    /// Load the name index on its own, without touching the city data.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        common_io::read_asset(path.as_ref())
    }
}

impl Catalog<DefaultBackend> {
    /// `data/` next to this crate's manifest.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Load the catalog from the default data directory.
    ///
    /// The result is cached for the lifetime of the process; every call after
    /// the first successful one returns the same instance. A failed load is
    /// not cached, so a later call retries.
    pub fn load() -> Result<&'static Self> {
        CATALOG_CACHE.get_or_try_init(|| Self::load_from_sources(&DataSources::default()))
    }

    /// Load the three default-named assets from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_sources(&DataSources::in_dir(dir))
    }

    /// Load a catalog from explicit asset paths.
    pub fn load_from_sources(sources: &DataSources) -> Result<Self> {
        let cities: Vec<City<DefaultBackend>> = common_io::read_asset(&sources.cities)?;
        let countries: Vec<Country<DefaultBackend>> = common_io::read_asset(&sources.countries)?;
        let name_index = CityNameIndex::load_from_path(&sources.city_name_idx)?;

        debug!(
            cities = cities.len(),
            countries = countries.len(),
            name_prefixes = name_index.len(),
            "decoded catalog assets"
        );

        Self::from_parts(cities, countries, Some(name_index))
    }

    /// Write this catalog as the three assets into `dir`, creating it if
    /// needed. The inverse of [`Catalog::load_from_dir`].
    ///
    /// A catalog without a name index is written in folded-name order with a
    /// freshly built index, the same layout the builder produces. Assets are
    /// staged under `.tmp` names and only renamed into place once all three
    /// were written, so a failed save never leaves a partial set behind.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> Result<DataSources> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let sources = DataSources::in_dir(dir);

        match self.name_index() {
            Some(index) => write_assets(&sources, self.cities(), self.countries(), index)?,
            None => {
                let mut cities = self.cities().to_vec();
                sort_by_name(&mut cities);
                let index = CityNameIndex::build(&cities);
                write_assets(&sources, &cities, self.countries(), &index)?;
            }
        }
        Ok(sources)
    }
}

fn write_assets(
    sources: &DataSources,
    cities: &[City<DefaultBackend>],
    countries: &[Country<DefaultBackend>],
    index: &CityNameIndex,
) -> Result<()> {
    let targets = [&sources.cities, &sources.countries, &sources.city_name_idx];
    let staged = targets.map(|p| staging_path(p));

    let written = common_io::write_asset(
        &staged[0],
        &cities,
        CompressionMode::for_path(&sources.cities),
    )
    .and_then(|()| common_io::write_asset(&staged[1], &countries, CompressionMode::None))
    .and_then(|()| common_io::write_asset(&staged[2], index, CompressionMode::None));

    if let Err(e) = written {
        warn!(error = %e, "saving catalog failed, staged assets removed");
        for path in &staged {
            let _ = std::fs::remove_file(path);
        }
        return Err(e);
    }

    for (from, to) in staged.iter().zip(targets) {
        std::fs::rename(from, to)?;
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Build the default catalog (cached per process).
pub fn build_catalog() -> Result<&'static Catalog<DefaultBackend>> {
    Catalog::load()
}
