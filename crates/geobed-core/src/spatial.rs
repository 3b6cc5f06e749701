// crates/geobed-core/src/spatial.rs

//! # Spatial hashing
//!
//! Coordinates are compared through fixed-precision geohashes: two places
//! sharing a longer hash prefix lie in the same, smaller cell. The encoding
//! itself comes from the [`geohash`] crate and is wrapped behind
//! [`SpatialEncoder`] so the resolver does not care where hashes come from.

use geohash::Coord;

/// Length of every geohash stored in the catalog and every query hash.
pub const HASH_LEN: usize = 12;

/// Number of leading characters checked before a candidate is scored.
pub const COARSE_PREFIX: usize = 2;

/// What [`GeohashEncoder`] emits for `(0, 0)`, the unset coordinate.
pub const UNSET_HASH: &str = "s00000000000";

/// Turns a coordinate into a [`HASH_LEN`]-character spatial hash.
pub trait SpatialEncoder: Send + Sync {
    /// Encode a coordinate. Returns `None` when the coordinate cannot be
    /// encoded at all (e.g. NaN); out-of-range values are the encoder's
    /// business to normalize.
    fn encode(&self, latitude: f64, longitude: f64) -> Option<String>;

    /// The hash this encoder emits for an unset `(0, 0)` coordinate.
    /// Queries that encode to it are treated as "no coordinate given".
    fn unset_sentinel(&self) -> &str;
}

/// [`SpatialEncoder`] backed by the `geohash` crate.
///
/// Latitudes are clamped to `[-90, 90]` and longitudes to `[-180, 180]`
/// before encoding, which yields the same cell a plain bisection would pick
/// for an out-of-range input.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeohashEncoder;

impl GeohashEncoder {
    pub const fn new() -> Self {
        Self
    }
}

impl SpatialEncoder for GeohashEncoder {
    fn encode(&self, latitude: f64, longitude: f64) -> Option<String> {
        encode_clamped(latitude, longitude)
    }

    fn unset_sentinel(&self) -> &str {
        UNSET_HASH
    }
}

/// Encode `(latitude, longitude)` to a [`HASH_LEN`] geohash.
///
/// Used by the asset builder so stored hashes and query hashes always come
/// from the same primitive.
pub fn encode_clamped(latitude: f64, longitude: f64) -> Option<String> {
    if latitude.is_nan() || longitude.is_nan() {
        return None;
    }
    let c = Coord {
        x: longitude.clamp(-180.0, 180.0),
        y: latitude.clamp(-90.0, 90.0),
    };
    geohash::encode(c, HASH_LEN).ok()
}

/// `true` when `hash` has exactly [`HASH_LEN`] bytes.
#[inline]
pub fn is_well_formed(hash: &str) -> bool {
    hash.len() == HASH_LEN
}
