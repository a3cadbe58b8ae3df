//! Container encoding

use crate::constants::{
    TrailerType, CONTAINER_MARKER, CONTAINER_VERSION, HEADER_SIZE, MAX_NAME_LEN,
    MAX_TENSOR_DATA_LEN, TENSOR_HEADER_SIZE,
};
use crate::error::CodecError;
use crate::types::TensorsConfig;
use alloc::format;
use alloc::vec::Vec;
use bytes::{BufMut, Bytes, BytesMut};

#[cfg(feature = "logging")]
use tracing::debug;

/// Destination storage for an encoded container
///
/// The encoder inspects [`capacity`](OutputBuffer::capacity) and then calls
/// exactly one of [`allocate`](OutputBuffer::allocate) (empty storage) or
/// [`grow`](OutputBuffer::grow) (undersized storage) before mapping the
/// region it writes. The mapping is a plain mutable borrow, so it is released
/// on every exit path.
pub trait OutputBuffer {
    /// Bytes of storage currently held
    fn capacity(&self) -> usize;

    /// Allocate storage for exactly `len` bytes (called only when capacity is 0)
    fn allocate(&mut self, len: usize) -> Result<(), CodecError>;

    /// Grow storage to at least `len` bytes (called only when capacity is short)
    fn grow(&mut self, len: usize) -> Result<(), CodecError>;

    /// Set the length to `len` and map that region for writing
    ///
    /// Must not reallocate; `len` never exceeds the capacity established by
    /// the preceding calls.
    fn map_write(&mut self, len: usize) -> Result<&mut [u8], CodecError>;
}

impl OutputBuffer for Vec<u8> {
    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    fn allocate(&mut self, len: usize) -> Result<(), CodecError> {
        self.try_reserve_exact(len.saturating_sub(self.len())).map_err(|e| {
            CodecError::ResourceUnavailable(format!("cannot allocate {} bytes: {:?}", len, e))
        })
    }

    fn grow(&mut self, len: usize) -> Result<(), CodecError> {
        self.try_reserve(len.saturating_sub(self.len())).map_err(|e| {
            CodecError::ResourceUnavailable(format!("cannot grow to {} bytes: {:?}", len, e))
        })
    }

    fn map_write(&mut self, len: usize) -> Result<&mut [u8], CodecError> {
        if len > Vec::capacity(self) {
            return Err(CodecError::ResourceUnavailable(format!(
                "cannot map {} bytes of a {} byte buffer",
                len,
                Vec::capacity(self)
            )));
        }
        self.clear();
        self.resize(len, 0);
        Ok(self.as_mut_slice())
    }
}

impl OutputBuffer for BytesMut {
    fn capacity(&self) -> usize {
        BytesMut::capacity(self)
    }

    fn allocate(&mut self, len: usize) -> Result<(), CodecError> {
        *self = BytesMut::with_capacity(len);
        Ok(())
    }

    fn grow(&mut self, len: usize) -> Result<(), CodecError> {
        self.reserve(len.saturating_sub(self.len()));
        Ok(())
    }

    fn map_write(&mut self, len: usize) -> Result<&mut [u8], CodecError> {
        if len > BytesMut::capacity(self) {
            return Err(CodecError::ResourceUnavailable(format!(
                "cannot map {} bytes of a {} byte buffer",
                len,
                BytesMut::capacity(self)
            )));
        }
        self.clear();
        self.resize(len, 0);
        Ok(&mut self[..])
    }
}

/// Compute the exact container size for `config` and `input`
///
/// Validates every input the encoder relies on, so a successful return
/// guarantees the subsequent write cannot fail.
pub fn encoded_len(
    config: &TensorsConfig,
    input: &[&[u8]],
    trailer: TrailerType,
) -> Result<usize, CodecError> {
    if input.len() != config.num_tensors() {
        return Err(CodecError::InvalidArgument(format!(
            "{} buffers supplied for {} tensors",
            input.len(),
            config.num_tensors()
        )));
    }

    let mut total = HEADER_SIZE;
    for (i, (info, data)) in config.tensors().iter().zip(input).enumerate() {
        let name_len = info.name().map_or(0, str::len);
        if name_len > MAX_NAME_LEN {
            return Err(CodecError::InvalidArgument(format!(
                "name of tensor {} is {} bytes, max {}",
                i, name_len, MAX_NAME_LEN
            )));
        }

        let expected = info.byte_size().ok_or_else(|| {
            CodecError::InvalidArgument(format!("byte size of tensor {} overflows", i))
        })?;
        if data.len() != expected {
            return Err(CodecError::InvalidArgument(format!(
                "tensor {} buffer is {} bytes, {} {} expects {}",
                i,
                data.len(),
                info.dimension(),
                info.element_type(),
                expected
            )));
        }
        if data.len() > MAX_TENSOR_DATA_LEN {
            return Err(CodecError::InvalidArgument(format!(
                "tensor {} buffer is {} bytes, max {}",
                i,
                data.len(),
                MAX_TENSOR_DATA_LEN
            )));
        }

        total = total
            .checked_add(TENSOR_HEADER_SIZE + name_len)
            .and_then(|t| t.checked_add(data.len()))
            .ok_or_else(|| CodecError::InvalidArgument("container size overflows".into()))?;
    }

    total
        .checked_add(trailer.size())
        .ok_or_else(|| CodecError::InvalidArgument("container size overflows".into()))
}

/// Map `required` bytes of `out`, allocating, growing or reusing its storage
fn acquire<B: OutputBuffer + ?Sized>(
    out: &mut B,
    required: usize,
) -> Result<&mut [u8], CodecError> {
    let capacity = out.capacity();
    if capacity == 0 {
        #[cfg(feature = "logging")]
        debug!("Allocating {} bytes for container", required);
        out.allocate(required)?;
    } else if capacity < required {
        #[cfg(feature = "logging")]
        debug!("Growing output from {} to {} bytes", capacity, required);
        out.grow(required)?;
    } else {
        #[cfg(feature = "logging")]
        debug!("Reusing {} byte output for {} byte container", capacity, required);
    }
    out.map_write(required)
}

/// Encode a frame into `out`, returning the container length
///
/// The container is laid out as follows (integers big-endian):
/// 1. Marker (4 bytes): "TNSF"
/// 2. Header:
///    - Version (1 byte)
///    - Flags (1 byte)
///    - Tensor count (2 bytes)
///    - Frame rate numerator and denominator (4 bytes each)
/// 3. Per tensor:
///    - Name length (2 bytes) and UTF-8 name
///    - Element type tag (1 byte)
///    - Rank (1 byte)
///    - Four unit-padded extents (4 bytes each)
///    - Data length (4 bytes) and raw data
/// 4. Trailer (optional, CRC32C or BLAKE3 over everything before it)
///
/// All validation happens before `out` is touched; on error the buffer is
/// left as it was.
pub fn encode_into<B: OutputBuffer + ?Sized>(
    config: &TensorsConfig,
    input: &[&[u8]],
    trailer: TrailerType,
    out: &mut B,
) -> Result<usize, CodecError> {
    let total = encoded_len(config, input, trailer)?;
    let body_len = total - trailer.size();

    let dst = acquire(out, total)?;

    {
        let mut buf: &mut [u8] = &mut dst[..body_len];

        buf.put_slice(CONTAINER_MARKER);
        buf.put_u8(CONTAINER_VERSION);
        buf.put_u8(trailer.flags().as_u8());
        buf.put_u16(config.num_tensors() as u16);
        buf.put_u32(config.rate().numerator());
        buf.put_u32(config.rate().denominator());

        for (info, data) in config.tensors().iter().zip(input) {
            let name = info.name().unwrap_or("");
            buf.put_u16(name.len() as u16);
            buf.put_slice(name.as_bytes());
            buf.put_u8(info.element_type().tag());
            buf.put_u8(info.dimension().rank() as u8);
            for &extent in info.dimension().extents() {
                buf.put_u32(extent);
            }
            buf.put_u32(data.len() as u32);
            buf.put_slice(data);
        }

        debug_assert!(buf.is_empty());
    }

    match trailer {
        TrailerType::None => {}
        TrailerType::Crc32c => {
            let checksum = compute_crc32c(&dst[..body_len]);
            dst[body_len..].copy_from_slice(&checksum.to_be_bytes());
        }
        TrailerType::Blake3 => {
            let hash = compute_blake3(&dst[..body_len]);
            dst[body_len..].copy_from_slice(&hash);
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Encoded {} tensor(s) into {} byte container ({} trailer)",
        config.num_tensors(),
        total,
        trailer.name()
    );

    Ok(total)
}

/// Encode a frame into freshly allocated bytes
pub fn encode_container(
    config: &TensorsConfig,
    input: &[&[u8]],
    trailer: TrailerType,
) -> Result<Bytes, CodecError> {
    let mut buf = Vec::new();
    encode_into(config, input, trailer, &mut buf)?;
    Ok(Bytes::from(buf))
}

/// Compute CRC32C checksum of data
fn compute_crc32c(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

/// Compute BLAKE3 hash of data
fn compute_blake3(data: &[u8]) -> [u8; 32] {
    let hash = blake3::hash(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(hash.as_bytes());
    result
}

/// Builder for encoding one frame with various options
pub struct ContainerBuilder<'a> {
    config: &'a TensorsConfig,
    buffers: Vec<&'a [u8]>,
    trailer: TrailerType,
}

impl<'a> ContainerBuilder<'a> {
    /// Create a new builder for a negotiated config
    pub fn new(config: &'a TensorsConfig) -> Self {
        Self {
            config,
            buffers: Vec::with_capacity(config.num_tensors()),
            trailer: TrailerType::None,
        }
    }

    /// Append the raw data of the next tensor
    pub fn tensor_data(mut self, data: &'a [u8]) -> Self {
        self.buffers.push(data);
        self
    }

    /// Set the raw data of every tensor at once
    pub fn buffers(mut self, buffers: &[&'a [u8]]) -> Self {
        self.buffers = buffers.to_vec();
        self
    }

    /// Select the trailer
    pub fn trailer(mut self, trailer: TrailerType) -> Self {
        self.trailer = trailer;
        self
    }

    /// Enable CRC32C trailer
    pub fn with_crc32c(self) -> Self {
        self.trailer(TrailerType::Crc32c)
    }

    /// Enable BLAKE3 trailer
    pub fn with_blake3(self) -> Self {
        self.trailer(TrailerType::Blake3)
    }

    /// Exact size the container will have
    pub fn encoded_len(&self) -> Result<usize, CodecError> {
        encoded_len(self.config, &self.buffers, self.trailer)
    }

    /// Encode into caller-owned storage
    pub fn build_into<B: OutputBuffer + ?Sized>(&self, out: &mut B) -> Result<usize, CodecError> {
        encode_into(self.config, &self.buffers, self.trailer, out)
    }

    /// Encode into freshly allocated bytes
    pub fn build(self) -> Result<Bytes, CodecError> {
        encode_container(self.config, &self.buffers, self.trailer)
    }
}
