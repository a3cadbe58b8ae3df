//! # Tensorframe Core
//!
//! Multi-tensor frames serialized into a single self-describing container,
//! plus the capability-string negotiation that tells a host which tensors
//! and frame rate a stream carries.
//!
//! ## Modules
//!
//! - `constants`: Container format constants and limits
//! - `types`: Tensor model (ElementType, Dimension, FrameRate, TensorInfo, TensorsConfig)
//! - `caps`: Capability string parsing and advertisement
//! - `encoder`: Container encoding into host-provided output buffers
//! - `decoder`: Strict container decoding
//! - `codec`: Codec trait and explicit registry

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod caps;
pub mod codec;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use caps::{parse_caps, CheckStatus, ParsedCaps};
pub use codec::{CodecRegistry, TensorCodec, TensorFrameCodec};
pub use decoder::{decode_container, decode_container_zero_copy, DecodedFrame};
pub use encoder::{encode_container, encode_into, ContainerBuilder, OutputBuffer};
pub use error::CodecError;
pub use types::{Dimension, ElementType, FrameRate, TensorInfo, TensorsConfig};

/// Result type alias for Tensorframe operations
pub type Result<T> = core::result::Result<T, CodecError>;
