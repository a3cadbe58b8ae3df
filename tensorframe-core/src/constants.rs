//! Constants and limits for the Tensorframe container format

use serde::{Deserialize, Serialize};

/// Container marker - 4 bytes at the start of every container
pub const CONTAINER_MARKER: &[u8; 4] = b"TNSF";

/// Current container version
pub const CONTAINER_VERSION: u8 = 1;

/// Maximum rank of a tensor; shorter shapes are padded with unit extents
pub const RANK_LIMIT: usize = 4;

/// Maximum number of tensors in a single frame
pub const TENSOR_SIZE_LIMIT: usize = 65535;

/// Maximum length of a tensor name in bytes
pub const MAX_NAME_LEN: usize = u16::MAX as usize;

/// Maximum length of a single tensor payload in bytes
pub const MAX_TENSOR_DATA_LEN: usize = u32::MAX as usize;

/// Fixed header size:
/// 4 (marker) + 1 (version) + 1 (flags) + 2 (num_tensors) + 4 (rate_n) + 4 (rate_d) = 16 bytes
pub const HEADER_SIZE: usize = 16;

/// Fixed per-tensor overhead excluding the name and data bytes:
/// 2 (name_len) + 1 (type) + 1 (rank) + 4 * RANK_LIMIT (dims) + 4 (data_len) = 24 bytes
pub const TENSOR_HEADER_SIZE: usize = 2 + 1 + 1 + 4 * RANK_LIMIT + 4;

/// Size of BLAKE3 hash in bytes
pub const BLAKE3_HASH_SIZE: usize = 32;

/// Size of CRC32C checksum in bytes
pub const CRC32C_SIZE: usize = 4;

/// Trailer types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailerType {
    /// No trailer
    None,
    /// CRC32C checksum (4 bytes)
    Crc32c,
    /// BLAKE3 hash (32 bytes)
    Blake3,
}

impl TrailerType {
    /// Returns the size of the trailer in bytes
    pub const fn size(&self) -> usize {
        match self {
            TrailerType::None => 0,
            TrailerType::Crc32c => CRC32C_SIZE,
            TrailerType::Blake3 => BLAKE3_HASH_SIZE,
        }
    }

    /// Parse a trailer name as accepted by codec options
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(TrailerType::None),
            "crc32c" => Some(TrailerType::Crc32c),
            "blake3" => Some(TrailerType::Blake3),
            _ => None,
        }
    }

    /// Lowercase name of the trailer
    pub const fn name(&self) -> &'static str {
        match self {
            TrailerType::None => "none",
            TrailerType::Crc32c => "crc32c",
            TrailerType::Blake3 => "blake3",
        }
    }

    /// Flags byte announcing this trailer
    pub const fn flags(&self) -> ContainerFlags {
        match self {
            TrailerType::None => ContainerFlags::new(ContainerFlags::NONE),
            TrailerType::Crc32c => ContainerFlags::new(ContainerFlags::HAS_CRC32C),
            TrailerType::Blake3 => ContainerFlags::new(ContainerFlags::HAS_BLAKE3),
        }
    }
}

impl Default for TrailerType {
    fn default() -> Self {
        TrailerType::None
    }
}

/// Flags for container options (stored as a single byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerFlags(u8);

impl ContainerFlags {
    /// No flags set
    pub const NONE: u8 = 0b0000_0000;

    /// Container has CRC32C trailer
    pub const HAS_CRC32C: u8 = 0b0000_0001;

    /// Container has BLAKE3 trailer
    pub const HAS_BLAKE3: u8 = 0b0000_0010;

    /// Every bit this version understands
    pub const KNOWN: u8 = Self::HAS_CRC32C | Self::HAS_BLAKE3;

    /// Create new flags from raw byte
    pub const fn new(flags: u8) -> Self {
        Self(flags)
    }

    /// Get raw flags byte
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Check if CRC32C trailer is present
    pub const fn has_crc32c(&self) -> bool {
        (self.0 & Self::HAS_CRC32C) != 0
    }

    /// Check if BLAKE3 trailer is present
    pub const fn has_blake3(&self) -> bool {
        (self.0 & Self::HAS_BLAKE3) != 0
    }

    /// Check that no unknown bits are set and at most one trailer is announced
    pub const fn is_valid(&self) -> bool {
        (self.0 & !Self::KNOWN) == 0 && !(self.has_crc32c() && self.has_blake3())
    }

    /// Get the trailer type
    pub const fn trailer_type(&self) -> TrailerType {
        if self.has_blake3() {
            TrailerType::Blake3
        } else if self.has_crc32c() {
            TrailerType::Crc32c
        } else {
            TrailerType::None
        }
    }
}

impl Default for ContainerFlags {
    fn default() -> Self {
        Self(Self::NONE)
    }
}
