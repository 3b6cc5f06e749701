// crates/geobed-core/src/error.rs
use thiserror::Error;

/// Everything that can go wrong while building or loading a [`Catalog`](crate::Catalog).
///
/// Queries never produce a `GeoError`: a coordinate that matches nothing
/// resolves to `None`.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Underlying I/O failure (unreadable file, broken gzip stream, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required packaged data source does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A binary asset could not be decoded into the expected record shape.
    #[error("failed to decode binary asset: {0}")]
    Bincode(#[from] bincode::Error),

    /// Records decoded fine but violate a catalog invariant.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;
