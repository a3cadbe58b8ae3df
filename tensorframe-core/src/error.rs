//! Error types for Tensorframe operations

use alloc::string::String;

/// Errors that can occur while building, parsing, encoding or decoding tensor frames
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A required input is missing or inconsistent with its companion inputs
    #[cfg_attr(feature = "std", error("Invalid argument: {0}"))]
    InvalidArgument(String),

    /// Tensor shape violates the rank or extent limits
    #[cfg_attr(feature = "std", error("Invalid shape: {0}"))]
    InvalidShape(String),

    /// Element type is outside the supported set
    #[cfg_attr(feature = "std", error("Unknown element type: {0}"))]
    UnknownType(String),

    /// Dimension fields of a capability descriptor disagree with each other
    #[cfg_attr(feature = "std", error("Malformed dimension: {0}"))]
    MalformedDimension(String),

    /// Destination storage could not be acquired
    #[cfg_attr(feature = "std", error("Resource unavailable: {0}"))]
    ResourceUnavailable(String),

    /// Container contents are internally inconsistent
    #[cfg_attr(feature = "std", error("Corrupt container: {0}"))]
    CorruptContainer(String),

    /// Invalid container marker detected
    #[cfg_attr(feature = "std", error("Invalid container marker: expected TNSF, got {0:?}"))]
    BadMarker([u8; 4]),

    /// Unsupported container version
    #[cfg_attr(feature = "std", error("Unsupported container version: {0}"))]
    UnsupportedVersion(u8),

    /// Incomplete container - not enough data
    #[cfg_attr(
        feature = "std",
        error("Incomplete container: expected {expected} bytes, got {actual}")
    )]
    IncompleteContainer {
        /// The number of bytes expected.
        expected: usize,
        /// The number of bytes actually found.
        actual: usize,
    },

    /// Checksum mismatch
    #[cfg_attr(feature = "std", error("Checksum mismatch: expected {expected:x}, got {actual:x}"))]
    ChecksumMismatch {
        /// The expected checksum.
        expected: u32,
        /// The actual checksum calculated.
        actual: u32,
    },

    /// Hash mismatch
    #[cfg_attr(feature = "std", error("Hash mismatch"))]
    HashMismatch,

    /// IO error during read/write
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),
}

impl CodecError {
    /// Whether this error reports damaged or inconsistent container bytes
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            CodecError::CorruptContainer(_)
                | CodecError::BadMarker(_)
                | CodecError::UnsupportedVersion(_)
                | CodecError::IncompleteContainer { .. }
                | CodecError::ChecksumMismatch { .. }
                | CodecError::HashMismatch
        )
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}
