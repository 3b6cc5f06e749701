// crates/geobed-core/src/lib.rs

//! # geobed-core
//!
//! Offline reverse geocoding: turn a `(latitude, longitude)` into the most
//! likely city from a bundled dataset, without calling any external service.
//!
//! ```no_run
//! use geobed_core::{build_catalog, resolve};
//!
//! let catalog = build_catalog()?;
//! match resolve(catalog, 47.37, 8.54) {
//!     Some(city) => println!("{}, {} ({})", city.name(), city.region(), city.country_code()),
//!     None => println!("nothing nearby"),
//! }
//! # Ok::<(), geobed_core::GeoError>(())
//! ```
//!
//! Every city carries a precomputed 12 character geohash. A query is encoded
//! the same way and matched against all cities by shared hash prefix, with
//! population as the tie-break (see [`resolve`](mod@resolve)).
//!
//! The [`Catalog`] is built once and never mutated, so it can be shared by
//! any number of threads.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod spatial;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::catalog::Catalog;
pub use crate::error::{GeoError, Result};
pub use crate::loader::{build_catalog, DataSources};
pub use crate::model::{City, CityNameIndex, Country, DbStats};
pub use crate::resolve::{resolve, Resolver};
pub use crate::spatial::{GeohashEncoder, SpatialEncoder, HASH_LEN};
pub use crate::traits::{DefaultBackend, GeoBackend, StandardBackend};

pub mod prelude {
    pub use crate::{
        build_catalog, resolve, Catalog, City, Country, DefaultBackend, GeoError, Resolver,
        Result, StandardBackend,
    };
}
