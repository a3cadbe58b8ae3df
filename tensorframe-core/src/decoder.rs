//! Container decoding (strict mode)

use crate::constants::{
    ContainerFlags, TrailerType, CONTAINER_MARKER, CONTAINER_VERSION, HEADER_SIZE, RANK_LIMIT,
    TENSOR_HEADER_SIZE,
};
use crate::error::CodecError;
use crate::types::{Dimension, ElementType, FrameRate, TensorInfo, TensorsConfig};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::{Buf, Bytes};
use core::ops::Range;
#[cfg(feature = "std")]
use std::io::Read;

#[cfg(feature = "logging")]
use tracing::debug;

/// Fixed header of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Container version
    pub version: u8,
    /// Container flags
    pub flags: ContainerFlags,
    /// Number of tensors that follow
    pub num_tensors: u16,
    /// Frame rate of the frame
    pub rate: FrameRate,
}

/// A fully decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Tensor metadata and frame rate, derived solely from the container
    pub config: TensorsConfig,

    /// Raw data per tensor, in wire order
    pub buffers: Vec<Bytes>,

    /// Container flags
    pub flags: ContainerFlags,

    /// Number of bytes the container occupied
    pub size: usize,
}

impl DecodedFrame {
    /// Trailer that protected this container
    pub fn trailer_type(&self) -> TrailerType {
        self.flags.trailer_type()
    }

    /// Raw data of tensor `index`
    pub fn buffer(&self, index: usize) -> Option<&[u8]> {
        self.buffers.get(index).map(|b| b.as_ref())
    }

    /// Split into metadata and buffers
    pub fn into_parts(self) -> (TensorsConfig, Vec<Bytes>) {
        (self.config, self.buffers)
    }
}

/// Bounds-checked cursor over container bytes
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(len).ok_or_else(|| {
            CodecError::CorruptContainer(format!("length {} at offset {} overflows", len, self.pos))
        })?;
        if end > self.data.len() {
            return Err(CodecError::IncompleteContainer {
                expected: end,
                actual: self.data.len(),
            });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn range(&mut self, len: usize) -> Result<Range<usize>, CodecError> {
        let start = self.pos;
        self.take(len)?;
        Ok(start..self.pos)
    }

    fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?.get_u8())
    }

    fn u16(&mut self) -> Result<u16, CodecError> {
        Ok(self.take(2)?.get_u16())
    }

    fn u32(&mut self) -> Result<u32, CodecError> {
        Ok(self.take(4)?.get_u32())
    }
}

fn read_header(reader: &mut Reader<'_>) -> Result<ContainerHeader, CodecError> {
    let available = reader.data.len();
    if available < HEADER_SIZE {
        return Err(CodecError::IncompleteContainer {
            expected: HEADER_SIZE,
            actual: available,
        });
    }

    let marker = reader.take(4)?;
    if marker != CONTAINER_MARKER {
        let mut bad = [0u8; 4];
        bad.copy_from_slice(marker);
        return Err(CodecError::BadMarker(bad));
    }

    let version = reader.u8()?;
    if version != CONTAINER_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let flags = ContainerFlags::new(reader.u8()?);
    if !flags.is_valid() {
        return Err(CodecError::CorruptContainer(format!(
            "invalid flags {:#010b}",
            flags.as_u8()
        )));
    }

    let num_tensors = reader.u16()?;
    if num_tensors == 0 {
        return Err(CodecError::CorruptContainer(
            "container declares zero tensors".into(),
        ));
    }

    let rate_n = reader.u32()?;
    let rate_d = reader.u32()?;
    let rate = FrameRate::new(rate_n, rate_d)
        .map_err(|_| CodecError::CorruptContainer(format!("frame rate {}/0", rate_n)))?;

    Ok(ContainerHeader {
        version,
        flags,
        num_tensors,
        rate,
    })
}

/// Read only the fixed header of a container
pub fn peek_header(data: &[u8]) -> Result<ContainerHeader, CodecError> {
    read_header(&mut Reader::new(data))
}

/// Read one tensor's description and its validated data length
fn read_tensor_header(
    reader: &mut Reader<'_>,
    index: usize,
) -> Result<(TensorInfo, usize), CodecError> {
    let corrupt =
        |what: String| CodecError::CorruptContainer(format!("tensor {}: {}", index, what));

    let name_len = reader.u16()? as usize;
    let name = core::str::from_utf8(reader.take(name_len)?)
        .map_err(|_| corrupt("name is not UTF-8".into()))?;

    let tag = reader.u8()?;
    let element_type = ElementType::from_tag(tag);
    if !element_type.is_known() {
        return Err(corrupt(format!("unknown type tag {}", tag)));
    }

    let rank = reader.u8()?;
    let mut extents = [0u32; RANK_LIMIT];
    for extent in extents.iter_mut() {
        *extent = reader.u32()?;
    }
    let dimension = Dimension::from_padded(rank, extents)
        .map_err(|_| corrupt(format!("invalid shape {:?} with rank {}", extents, rank)))?;

    let info = TensorInfo::new(Some(String::from(name)), element_type, dimension)
        .map_err(|_| corrupt(format!("element count of {:?} overflows", extents)))?;

    let data_len = reader.u32()? as usize;
    let expected = info
        .byte_size()
        .ok_or_else(|| corrupt(format!("byte size of {:?} overflows", extents)))?;
    if data_len != expected {
        return Err(corrupt(format!(
            "data is {} bytes but {} {} needs {}",
            data_len, dimension, element_type, expected
        )));
    }

    Ok((info, data_len))
}

fn read_tensor(
    reader: &mut Reader<'_>,
    index: usize,
) -> Result<(TensorInfo, Range<usize>), CodecError> {
    let (info, data_len) = read_tensor_header(reader, index)?;
    let range = reader.range(data_len)?;
    Ok((info, range))
}

fn verify_trailer(reader: &mut Reader<'_>, trailer: TrailerType) -> Result<(), CodecError> {
    let body_end = reader.pos;
    match trailer {
        TrailerType::None => {}
        TrailerType::Crc32c => {
            let expected = reader.u32()?;
            let actual = crc32c::crc32c(&reader.data[..body_end]);
            if actual != expected {
                return Err(CodecError::ChecksumMismatch { expected, actual });
            }
        }
        TrailerType::Blake3 => {
            let expected = reader.take(32)?;
            let actual = blake3::hash(&reader.data[..body_end]);
            if actual.as_bytes() != expected {
                return Err(CodecError::HashMismatch);
            }
        }
    }
    Ok(())
}

struct Layout {
    config: TensorsConfig,
    ranges: Vec<Range<usize>>,
    flags: ContainerFlags,
    size: usize,
}

fn parse_layout(data: &[u8]) -> Result<Layout, CodecError> {
    let mut reader = Reader::new(data);
    let header = read_header(&mut reader)?;

    let count = header.num_tensors as usize;
    let mut tensors = Vec::with_capacity(count);
    let mut ranges = Vec::with_capacity(count);
    for index in 0..count {
        let (info, range) = read_tensor(&mut reader, index)?;
        tensors.push(info);
        ranges.push(range);
    }

    verify_trailer(&mut reader, header.flags.trailer_type())?;

    let config = TensorsConfig::new(tensors, header.rate)
        .map_err(|_| CodecError::CorruptContainer("tensor count out of range".into()))?;

    #[cfg(feature = "logging")]
    debug!(
        "Decoded {} tensor(s) from {} byte container ({} trailing bytes ignored)",
        count,
        reader.pos,
        data.len() - reader.pos
    );

    Ok(Layout {
        config,
        ranges,
        flags: header.flags,
        size: reader.pos,
    })
}

/// Decode a container from a byte slice, copying tensor data
///
/// This function performs strict validation:
/// - Validates marker, version and flags
/// - Validates tensor count, rank, padding and type of every tensor
/// - Validates each data length against its shape and type
/// - Validates checksum/hash if present
///
/// Bytes after the container are ignored. Returns an error if any validation
/// fails; no partial frame is produced.
pub fn decode_container(data: &[u8]) -> Result<DecodedFrame, CodecError> {
    let layout = parse_layout(data)?;
    let buffers = layout
        .ranges
        .into_iter()
        .map(|r| Bytes::copy_from_slice(&data[r]))
        .collect();

    Ok(DecodedFrame {
        config: layout.config,
        buffers,
        flags: layout.flags,
        size: layout.size,
    })
}

/// Decode a container without copying tensor data
///
/// The returned buffers are slices of `buf`.
pub fn decode_container_zero_copy(buf: Bytes) -> Result<DecodedFrame, CodecError> {
    let layout = parse_layout(&buf)?;
    let buffers = layout.ranges.into_iter().map(|r| buf.slice(r)).collect();

    Ok(DecodedFrame {
        config: layout.config,
        buffers,
        flags: layout.flags,
        size: layout.size,
    })
}

#[cfg(feature = "std")]
fn read_chunk<R: Read>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    len: usize,
) -> Result<(), CodecError> {
    let start = buf.len();
    let read = reader.by_ref().take(len as u64).read_to_end(buf)?;
    if read < len {
        return Err(CodecError::IncompleteContainer {
            expected: start + len,
            actual: start + read,
        });
    }
    Ok(())
}

/// Decode one container from a reader
///
/// Reads exactly the bytes of one container, so consecutive containers in a
/// stream can be decoded by calling this repeatedly.
#[cfg(feature = "std")]
pub fn decode_container_from_reader<R: Read>(reader: &mut R) -> Result<DecodedFrame, CodecError> {
    let mut data = Vec::with_capacity(HEADER_SIZE);
    read_chunk(reader, &mut data, HEADER_SIZE)?;
    let header = peek_header(&data)?;

    for index in 0..header.num_tensors as usize {
        let at = data.len();
        read_chunk(reader, &mut data, 2)?;
        let name_len = u16::from_be_bytes([data[at], data[at + 1]]) as usize;

        // name, type, rank, extents and data length
        read_chunk(reader, &mut data, name_len + TENSOR_HEADER_SIZE - 2)?;
        let (_, data_len) = read_tensor_header(&mut Reader::new(&data[at..]), index)?;
        read_chunk(reader, &mut data, data_len)?;
    }

    read_chunk(reader, &mut data, header.flags.trailer_type().size())?;
    decode_container_zero_copy(Bytes::from(data))
}
