//! Library entry for tensorframe-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use tensorframe_core::constants::TrailerType;

/// Trailer selected on the command line
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TrailerChoice {
    /// No integrity trailer
    #[default]
    None,
    /// CRC32C checksum
    Crc32c,
    /// BLAKE3 hash
    Blake3,
}

impl From<TrailerChoice> for TrailerType {
    fn from(choice: TrailerChoice) -> Self {
        match choice {
            TrailerChoice::None => TrailerType::None,
            TrailerChoice::Crc32c => TrailerType::Crc32c,
            TrailerChoice::Blake3 => TrailerType::Blake3,
        }
    }
}
