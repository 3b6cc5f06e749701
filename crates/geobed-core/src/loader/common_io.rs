// crates/geobed-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// Upper bound on the bytes one asset may decode from. Counted while the
/// stream is read, so it also caps what a gzip'd asset can inflate to.
const DECODE_LIMIT: u64 = 512 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    /// Gzip for `*.gz` paths, plain otherwise.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => CompressionMode::Gzip,
            _ => CompressionMode::None,
        }
    }
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when asked to.
/// Returns a generic Reader so the caller doesn't care about the compression.
pub fn open_stream(path: &Path, compression: CompressionMode) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
        }
        _ => GeoError::Io(e),
    })?;

    let reader = BufReader::new(file);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Ok(Box::new(GzDecoder::new(reader)))
            }
            #[cfg(not(feature = "compact"))]
            {
                Err(GeoError::InvalidData(format!(
                    "{} is gzip-compressed but 'compact' is disabled",
                    path.display()
                )))
            }
        }
        CompressionMode::None => Ok(Box::new(reader)),
    }
}

/// Decodes one bincode value straight from a reader.
///
/// Nothing is buffered up front: a length prefix past `DECODE_LIMIT` fails
/// before anything is allocated for it. Read and gzip failures surface as
/// [`GeoError::Io`]; a stream that ends early or does not decode is
/// [`GeoError::Bincode`].
pub fn decode_from_reader<T: DeserializeOwned>(reader: impl Read) -> Result<T> {
    bincode_options()
        .deserialize_from(reader)
        .map_err(|err| match *err {
            bincode::ErrorKind::Io(e) if e.kind() != ErrorKind::UnexpectedEof => GeoError::Io(e),
            other => GeoError::Bincode(Box::new(other)),
        })
}

/// Reads and decodes a binary asset, picking compression from the extension.
pub fn read_asset<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = open_stream(path, CompressionMode::for_path(path))?;
    decode_from_reader(BufReader::new(reader))
}

/// Writes ANY serializable value to disk as a bincode asset.
pub fn write_asset<T: Serialize>(
    path: &Path,
    value: &T,
    compression: CompressionMode,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                bincode_options().serialize_into(&mut encoder, value)?;
                // finish() writes the gzip trailer; Drop would swallow its error.
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(GeoError::InvalidData(format!(
                    "Gzip requested for {} but 'compact' disabled",
                    path.display()
                )));
            }
        }
        CompressionMode::None => {
            bincode_options().serialize_into(&mut writer, value)?;
            writer.flush()?;
        }
    }
    Ok(())
}

// Fixed-int encoding, same layout as `bincode::serialize`.
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(DECODE_LIMIT)
}
