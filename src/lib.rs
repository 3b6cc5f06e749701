//! Workspace host for `geobed-core`; re-exports its public API so the demos
//! can `use geobed_rs::prelude::*`.
pub use geobed_core::*;
