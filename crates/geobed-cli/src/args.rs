use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geobed-cli
#[derive(Debug, Parser)]
#[command(
    name = "geobed",
    version,
    about = "Build and inspect the geobed-core offline city catalog"
)]
pub struct CliArgs {
    /// Directory holding cities.bin(.gz), countries.bin and city_name_idx.bin
    /// (default: the data/ directory of geobed-core)
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the binary assets from GeoNames dumps
    Build {
        /// Directory containing cities1000.txt, countryInfo.txt and optionally
        /// admin1CodesASCII.txt (plain or .gz)
        #[arg(short = 's', long = "source-dir")]
        source_dir: PathBuf,
    },

    /// Show a summary of the catalog contents
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show metadata for a country by ISO2 or ISO3 code
    Country {
        /// ISO2 or ISO3 code (e.g. CH, CHE)
        code: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
