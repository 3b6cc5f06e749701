// crates/geobed-core/src/resolve.rs

//! # Reverse geocoding
//!
//! Maps a coordinate to the single best-matching [`City`] of a [`Catalog`].
//!
//! ## Algorithm
//!
//! 1. Encode the query to a [`HASH_LEN`]-character geohash. A hash equal to
//!    the encoder's unset sentinel means "no coordinate" and resolves to
//!    `None` straight away.
//! 2. Walk every city in catalog order. Cities whose first
//!    [`COARSE_PREFIX`] hash characters differ from the query are skipped
//!    after at most two byte comparisons.
//! 3. Survivors are scored with [`prefix_score`]. A strictly higher score
//!    takes the lead; an equal score takes it only with a strictly larger
//!    population.
//!
//! Because both comparisons are strict, a candidate tying the leader on
//! score *and* population never displaces it: full ties resolve to the city
//! that comes first in the catalog. Dataset order is therefore part of the
//! result, and the same catalog always gives the same answer.
//!
//! The scan is O(n) with no secondary spatial index.

use crate::catalog::Catalog;
use crate::model::City;
use crate::spatial::{GeohashEncoder, SpatialEncoder, COARSE_PREFIX, HASH_LEN};
use crate::traits::GeoBackend;
use tracing::trace;

/// Reverse geocoder bound to one catalog.
///
/// Holds no mutable state, so one resolver can serve any number of threads.
///
/// ```rust
/// use geobed_core::{Catalog, City, DefaultBackend, Resolver};
///
/// let cities = vec![
///     City::<DefaultBackend>::new("Zurich", "CH", 47.36667, 8.55).unwrap(),
///     City::new("Geneva", "CH", 46.20222, 6.14569).unwrap(),
/// ];
/// let catalog = Catalog::from_parts(cities, Vec::new(), None).unwrap();
/// let resolver = Resolver::new(&catalog);
///
/// let hit = resolver.resolve(47.37, 8.54).unwrap();
/// assert_eq!(hit.name(), "Zurich");
/// ```
pub struct Resolver<'a, B: GeoBackend, E: SpatialEncoder = GeohashEncoder> {
    catalog: &'a Catalog<B>,
    encoder: E,
}

impl<'a, B: GeoBackend> Resolver<'a, B, GeohashEncoder> {
    pub fn new(catalog: &'a Catalog<B>) -> Self {
        Self::with_encoder(catalog, GeohashEncoder::new())
    }
}

impl<'a, B: GeoBackend, E: SpatialEncoder> Resolver<'a, B, E> {
    /// Resolver using a custom spatial encoder. The encoder must produce
    /// hashes comparable with the ones stored in the catalog.
    pub fn with_encoder(catalog: &'a Catalog<B>, encoder: E) -> Self {
        Self { catalog, encoder }
    }

    pub fn catalog(&self) -> &'a Catalog<B> {
        self.catalog
    }

    /// The city best matching `(latitude, longitude)`, or `None` when no city
    /// shares the query's coarse cell or the coordinate is unset.
    pub fn resolve(&self, latitude: f64, longitude: f64) -> Option<&'a City<B>> {
        let query = self.encoder.encode(latitude, longitude)?;
        if query == self.encoder.unset_sentinel() {
            trace!(latitude, longitude, "unset coordinate, skipping lookup");
            return None;
        }
        best_match(self.catalog.cities(), &query)
    }
}

/// Scan `cities` for the best match against an already-encoded query hash.
pub fn best_match<'a, B: GeoBackend>(cities: &'a [City<B>], query: &str) -> Option<&'a City<B>> {
    let q = query.as_bytes();
    if q.len() < COARSE_PREFIX {
        return None;
    }

    let mut best: Option<&'a City<B>> = None;
    let mut best_score = 0;

    for city in cities {
        let h = city.geohash().as_bytes();
        if h.len() < COARSE_PREFIX || h[0] != q[0] || h[1] != q[1] {
            continue;
        }

        let score = prefix_score(h, q);
        let takes_lead = match best {
            None => true,
            Some(current) => {
                score > best_score
                    || (score == best_score && city.population() > current.population())
            }
        };
        if takes_lead {
            best = Some(city);
            best_score = score;
        }
    }

    best
}

/// Matched-prefix score of a candidate hash against a query hash whose
/// first [`COARSE_PREFIX`] bytes are already known to agree.
///
/// Starts at [`COARSE_PREFIX`] and adds one for every `i` in
/// `COARSE_PREFIX..=HASH_LEN` where both `[..i]` prefixes are equal. Each
/// length is checked on its own; a slice that would run past either hash
/// counts as a mismatch. Two identical hashes score `HASH_LEN + 1`.
///
/// ```rust
/// use geobed_core::resolve::prefix_score;
///
/// assert_eq!(prefix_score(b"abcdefghijkl", b"abcdefghijkl"), 13);
/// assert_eq!(prefix_score(b"abcdezzzzzzz", b"abcdefghijkl"), 6);
/// ```
pub fn prefix_score(candidate: &[u8], query: &[u8]) -> usize {
    let mut matched = COARSE_PREFIX;
    for i in COARSE_PREFIX..=HASH_LEN {
        match (candidate.get(..i), query.get(..i)) {
            (Some(a), Some(b)) if a == b => matched += 1,
            _ => {}
        }
    }
    matched
}

impl<B: GeoBackend> Catalog<B> {
    /// Shorthand for `Resolver::new(self).resolve(latitude, longitude)`.
    pub fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Option<&City<B>> {
        Resolver::new(self).resolve(latitude, longitude)
    }
}

/// Resolve a coordinate against `catalog` with the default geohash encoder.
pub fn resolve<B: GeoBackend>(
    catalog: &Catalog<B>,
    latitude: f64,
    longitude: f64,
) -> Option<&City<B>> {
    catalog.reverse_geocode(latitude, longitude)
}
