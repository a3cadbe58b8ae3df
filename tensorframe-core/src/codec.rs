//! Codec interface and explicit registration
//!
//! Hosts drive a [`TensorCodec`] once per frame. Codecs are looked up by mode
//! name in a [`CodecRegistry`] the host creates at startup and drops at
//! shutdown.

use crate::caps::tensors_caps_string;
use crate::constants::TrailerType;
use crate::decoder::{decode_container_zero_copy, DecodedFrame};
use crate::encoder::{encode_into, OutputBuffer};
use crate::error::CodecError;
use crate::types::TensorsConfig;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use bytes::Bytes;
use hashbrown::HashMap;

#[cfg(feature = "logging")]
use tracing::{debug, info};

/// Media type advertised for native containers
pub const MEDIA_TENSORFRAME: &str = "other/tensorframe";

/// A wire format for multi-tensor frames
pub trait TensorCodec: Send + Sync {
    /// Name the codec is registered under
    fn mode_name(&self) -> &str;

    /// Capability descriptor of the stream this codec produces for `config`
    fn advertise(&self, config: &TensorsConfig) -> String;

    /// Apply a named option
    fn set_option(&mut self, key: &str, value: &str) -> Result<(), CodecError>;

    /// Encode one frame into `out`, returning the number of bytes written
    fn encode(
        &self,
        config: &TensorsConfig,
        input: &[&[u8]],
        out: &mut dyn OutputBuffer,
    ) -> Result<usize, CodecError>;

    /// Decode one frame
    fn decode(&self, data: Bytes) -> Result<DecodedFrame, CodecError>;
}

/// The native `TNSF` container codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TensorFrameCodec {
    trailer: TrailerType,
}

impl TensorFrameCodec {
    /// Mode name of this codec
    pub const MODE_NAME: &'static str = "tensorframe";

    /// Create a codec writing no trailer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec writing the given trailer
    pub fn with_trailer(trailer: TrailerType) -> Self {
        Self { trailer }
    }

    /// Trailer written by `encode`
    pub fn trailer(&self) -> TrailerType {
        self.trailer
    }
}

impl TensorCodec for TensorFrameCodec {
    fn mode_name(&self) -> &str {
        Self::MODE_NAME
    }

    fn advertise(&self, config: &TensorsConfig) -> String {
        tensors_caps_string(MEDIA_TENSORFRAME, config)
    }

    fn set_option(&mut self, key: &str, value: &str) -> Result<(), CodecError> {
        match key {
            "trailer" => {
                self.trailer = TrailerType::from_name(value.trim()).ok_or_else(|| {
                    CodecError::InvalidArgument(format!("unknown trailer '{}'", value))
                })?;
                #[cfg(feature = "logging")]
                debug!("{} trailer set to {}", Self::MODE_NAME, self.trailer.name());
                Ok(())
            }
            _ => Err(CodecError::InvalidArgument(format!(
                "{} has no option '{}'",
                Self::MODE_NAME,
                key
            ))),
        }
    }

    fn encode(
        &self,
        config: &TensorsConfig,
        input: &[&[u8]],
        out: &mut dyn OutputBuffer,
    ) -> Result<usize, CodecError> {
        encode_into(config, input, self.trailer, out)
    }

    fn decode(&self, data: Bytes) -> Result<DecodedFrame, CodecError> {
        decode_container_zero_copy(data)
    }
}

/// Codecs available to a host, keyed by mode name
#[derive(Default, Clone)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn TensorCodec>>,
}

impl CodecRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in codecs
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.codecs.insert(
            String::from(TensorFrameCodec::MODE_NAME),
            Arc::new(TensorFrameCodec::new()),
        );
        registry
    }

    /// Register a codec under its mode name
    pub fn register(&mut self, codec: Arc<dyn TensorCodec>) -> Result<(), CodecError> {
        let name = codec.mode_name().to_string();
        if self.codecs.contains_key(&name) {
            return Err(CodecError::InvalidArgument(format!(
                "codec '{}' is already registered",
                name
            )));
        }

        #[cfg(feature = "logging")]
        info!("Registered tensor codec '{}'", name);

        self.codecs.insert(name, codec);
        Ok(())
    }

    /// Remove a codec, returning it if it was registered
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn TensorCodec>> {
        let removed = self.codecs.remove(name);

        #[cfg(feature = "logging")]
        if removed.is_some() {
            info!("Unregistered tensor codec '{}'", name);
        }

        removed
    }

    /// Look up a codec by mode name
    pub fn get(&self, name: &str) -> Option<Arc<dyn TensorCodec>> {
        self.codecs.get(name).cloned()
    }

    /// Registered mode names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.codecs.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether no codec is registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl core::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::parse_caps;
    use crate::types::{ElementType, FrameRate, TensorInfo};
    use alloc::vec;

    fn config() -> TensorsConfig {
        TensorsConfig::new(
            vec![
                TensorInfo::named("x", ElementType::Float32, &[2, 2]).unwrap(),
                TensorInfo::named("y", ElementType::Uint8, &[4, 1, 1, 1]).unwrap(),
            ],
            FrameRate::new(30, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_codec_round_trip_through_trait_object() {
        let codec: Arc<dyn TensorCodec> =
            Arc::new(TensorFrameCodec::with_trailer(TrailerType::Crc32c));
        let config = config();
        let x = [0u8; 16];
        let y = [1u8, 2, 3, 4];

        let mut out: Vec<u8> = Vec::new();
        let written = codec.encode(&config, &[&x[..], &y[..]], &mut out).unwrap();
        assert_eq!(written, out.len());

        let decoded = codec.decode(Bytes::from(out)).unwrap();
        assert_eq!(decoded.config, config);
        assert_eq!(decoded.buffer(1), Some(&y[..]));
        assert_eq!(decoded.trailer_type(), TrailerType::Crc32c);
    }

    #[test]
    fn test_advertise_parses_back() {
        let codec = TensorFrameCodec::new();
        let config = config();
        let caps = codec.advertise(&config);
        assert!(caps.starts_with(MEDIA_TENSORFRAME));

        let parsed = parse_caps(&caps).unwrap();
        assert!(parsed.is_fully_determined());
        let round = parsed.to_config().unwrap();
        assert_eq!(round.rate(), config.rate());
        for (a, b) in round.tensors().iter().zip(config.tensors()) {
            assert_eq!(a.dimension(), b.dimension());
            assert_eq!(a.element_type(), b.element_type());
        }
    }

    #[test]
    fn test_set_option() {
        let mut codec = TensorFrameCodec::new();
        codec.set_option("trailer", "blake3").unwrap();
        assert_eq!(codec.trailer(), TrailerType::Blake3);
        assert!(matches!(
            codec.set_option("trailer", "sha1"),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(matches!(
            codec.set_option("compression", "zstd"),
            Err(CodecError::InvalidArgument(_))
        ));
        assert_eq!(codec.trailer(), TrailerType::Blake3);
    }

    #[test]
    fn test_registry_lifecycle() {
        let mut registry = CodecRegistry::with_defaults();
        assert_eq!(registry.names(), vec![String::from("tensorframe")]);
        assert!(registry.get("tensorframe").is_some());
        assert!(registry.get("flatbuf").is_none());

        let duplicate = registry.register(Arc::new(TensorFrameCodec::new()));
        assert!(matches!(duplicate, Err(CodecError::InvalidArgument(_))));

        assert!(registry.unregister("tensorframe").is_some());
        assert!(registry.unregister("tensorframe").is_none());
        assert!(registry.is_empty());
    }
}
