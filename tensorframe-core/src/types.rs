//! Tensor metadata model: element types, dimensions, frame rates and frame configs

use crate::constants::{RANK_LIMIT, TENSOR_SIZE_LIMIT};
use crate::error::CodecError;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Element type of a tensor
///
/// The discriminants are the one-byte wire tags written into containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ElementType {
    /// 32-bit signed integer
    Int32 = 0,
    /// 32-bit unsigned integer
    Uint32 = 1,
    /// 16-bit signed integer
    Int16 = 2,
    /// 16-bit unsigned integer
    Uint16 = 3,
    /// 8-bit signed integer
    Int8 = 4,
    /// 8-bit unsigned integer
    Uint8 = 5,
    /// 64-bit IEEE float
    Float64 = 6,
    /// 32-bit IEEE float
    Float32 = 7,
    /// Sentinel for anything outside the supported set
    Unknown = 8,
}

impl ElementType {
    /// Every supported element type, in wire-tag order
    pub const ALL: [ElementType; 8] = [
        ElementType::Int32,
        ElementType::Uint32,
        ElementType::Int16,
        ElementType::Uint16,
        ElementType::Int8,
        ElementType::Uint8,
        ElementType::Float64,
        ElementType::Float32,
    ];

    /// Look up a type by its lowercase name. Unrecognized names yield `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "int32" => ElementType::Int32,
            "uint32" => ElementType::Uint32,
            "int16" => ElementType::Int16,
            "uint16" => ElementType::Uint16,
            "int8" => ElementType::Int8,
            "uint8" => ElementType::Uint8,
            "float64" => ElementType::Float64,
            "float32" => ElementType::Float32,
            _ => ElementType::Unknown,
        }
    }

    /// Lowercase name of the type
    pub const fn name(&self) -> &'static str {
        match self {
            ElementType::Int32 => "int32",
            ElementType::Uint32 => "uint32",
            ElementType::Int16 => "int16",
            ElementType::Uint16 => "uint16",
            ElementType::Int8 => "int8",
            ElementType::Uint8 => "uint8",
            ElementType::Float64 => "float64",
            ElementType::Float32 => "float32",
            ElementType::Unknown => "unknown",
        }
    }

    /// Width of one element in bytes (0 for `Unknown`)
    pub const fn size(&self) -> usize {
        match self {
            ElementType::Int8 | ElementType::Uint8 => 1,
            ElementType::Int16 | ElementType::Uint16 => 2,
            ElementType::Int32 | ElementType::Uint32 | ElementType::Float32 => 4,
            ElementType::Float64 => 8,
            ElementType::Unknown => 0,
        }
    }

    /// Wire tag of the type
    pub const fn tag(&self) -> u8 {
        *self as u8
    }

    /// Map a wire tag back to a type. Out-of-range tags yield `Unknown`.
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            0 => ElementType::Int32,
            1 => ElementType::Uint32,
            2 => ElementType::Int16,
            3 => ElementType::Uint16,
            4 => ElementType::Int8,
            5 => ElementType::Uint8,
            6 => ElementType::Float64,
            7 => ElementType::Float32,
            _ => ElementType::Unknown,
        }
    }

    /// Check whether this is one of the supported types
    pub const fn is_known(&self) -> bool {
        !matches!(self, ElementType::Unknown)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a tensor, innermost extent first
///
/// Always stores `RANK_LIMIT` extents; slots at or beyond `rank` hold 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimension")]
pub struct Dimension {
    rank: u8,
    extents: [u32; RANK_LIMIT],
}

impl Dimension {
    /// Build a dimension from 1 to `RANK_LIMIT` positive extents
    pub fn new(extents: &[u32]) -> Result<Self, CodecError> {
        if extents.is_empty() || extents.len() > RANK_LIMIT {
            return Err(CodecError::InvalidShape(format!(
                "rank {} is outside 1..={}",
                extents.len(),
                RANK_LIMIT
            )));
        }

        let mut padded = [1u32; RANK_LIMIT];
        for (i, &extent) in extents.iter().enumerate() {
            if extent == 0 {
                return Err(CodecError::InvalidShape(format!(
                    "dimension {} has zero extent",
                    i + 1
                )));
            }
            padded[i] = extent;
        }

        Ok(Self {
            rank: extents.len() as u8,
            extents: padded,
        })
    }

    /// Rebuild a dimension from a rank and a fully padded extent array
    ///
    /// Fails unless every slot beyond `rank` is exactly 1.
    pub fn from_padded(rank: u8, extents: [u32; RANK_LIMIT]) -> Result<Self, CodecError> {
        let rank_len = rank as usize;
        if rank_len == 0 || rank_len > RANK_LIMIT {
            return Err(CodecError::InvalidShape(format!(
                "rank {} is outside 1..={}",
                rank, RANK_LIMIT
            )));
        }
        if let Some(i) = extents[rank_len..].iter().position(|&e| e != 1) {
            return Err(CodecError::InvalidShape(format!(
                "padding slot {} holds {} instead of 1",
                rank_len + i + 1,
                extents[rank_len + i]
            )));
        }
        Self::new(&extents[..rank_len])
    }

    /// Parse the `d1:d2:d3:d4` form (1 to `RANK_LIMIT` colon-separated extents)
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let mut extents = Vec::with_capacity(RANK_LIMIT);
        for token in text.split(':') {
            let token = token.trim();
            let extent = token.parse::<u32>().map_err(|_| {
                CodecError::InvalidShape(format!("'{}' is not a dimension extent", token))
            })?;
            extents.push(extent);
        }
        Self::new(&extents)
    }

    /// Number of declared dimensions
    pub const fn rank(&self) -> usize {
        self.rank as usize
    }

    /// All `RANK_LIMIT` extents, unit-padded
    pub const fn extents(&self) -> &[u32; RANK_LIMIT] {
        &self.extents
    }

    /// The declared extents only
    pub fn declared(&self) -> &[u32] {
        &self.extents[..self.rank as usize]
    }

    /// Product of all extents, or `None` on overflow
    pub fn element_count(&self) -> Option<usize> {
        self.extents
            .iter()
            .try_fold(1usize, |acc, &e| acc.checked_mul(e as usize))
    }
}

#[derive(Deserialize)]
struct RawDimension {
    rank: u8,
    extents: [u32; RANK_LIMIT],
}

impl TryFrom<RawDimension> for Dimension {
    type Error = CodecError;

    fn try_from(raw: RawDimension) -> Result<Self, Self::Error> {
        Self::from_padded(raw.rank, raw.extents)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, extent) in self.declared().iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{}", extent)?;
        }
        Ok(())
    }
}

/// Frames per second as an unreduced fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFrameRate")]
pub struct FrameRate {
    numerator: u32,
    denominator: u32,
}

impl FrameRate {
    /// Rate used when none was negotiated
    pub const UNKNOWN: FrameRate = FrameRate {
        numerator: 0,
        denominator: 1,
    };

    /// Create a rate; the denominator must be positive
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, CodecError> {
        if denominator == 0 {
            return Err(CodecError::InvalidArgument(format!(
                "frame rate {}/0 has a zero denominator",
                numerator
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Parse `n/d` (or a bare integer `n`, meaning `n/1`)
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let bad = || CodecError::InvalidArgument(format!("'{}' is not a fraction", text));
        let (num, den) = match text.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (text.trim(), "1"),
        };
        let numerator = num.parse::<u32>().map_err(|_| bad())?;
        let denominator = den.parse::<u32>().map_err(|_| bad())?;
        Self::new(numerator, denominator)
    }

    /// Numerator
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Denominator, never zero
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Whether this rate carries no information (numerator 0)
    pub const fn is_unknown(&self) -> bool {
        self.numerator == 0
    }
}

#[derive(Deserialize)]
struct RawFrameRate {
    numerator: u32,
    denominator: u32,
}

impl TryFrom<RawFrameRate> for FrameRate {
    type Error = CodecError;

    fn try_from(raw: RawFrameRate) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Name, element type and shape of one tensor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTensorInfo")]
pub struct TensorInfo {
    name: Option<String>,
    element_type: ElementType,
    dimension: Dimension,
}

impl TensorInfo {
    /// Create a tensor descriptor. `Some("")` is a valid unnamed marker.
    pub fn new(
        name: Option<String>,
        element_type: ElementType,
        dimension: Dimension,
    ) -> Result<Self, CodecError> {
        if !element_type.is_known() {
            return Err(CodecError::UnknownType(String::from(element_type.name())));
        }
        if dimension.element_count().is_none() {
            return Err(CodecError::InvalidShape(format!(
                "element count of {} overflows",
                dimension
            )));
        }
        Ok(Self {
            name,
            element_type,
            dimension,
        })
    }

    /// Shorthand for a named tensor built from raw extents
    pub fn named(
        name: impl Into<String>,
        element_type: ElementType,
        extents: &[u32],
    ) -> Result<Self, CodecError> {
        Self::new(Some(name.into()), element_type, Dimension::new(extents)?)
    }

    /// Tensor name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Element type
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Shape
    pub const fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.dimension.element_count().unwrap_or(0)
    }

    /// Expected raw buffer length in bytes, or `None` on overflow
    pub fn byte_size(&self) -> Option<usize> {
        self.dimension
            .element_count()?
            .checked_mul(self.element_type.size())
    }
}

#[derive(Deserialize)]
struct RawTensorInfo {
    name: Option<String>,
    element_type: ElementType,
    dimension: Dimension,
}

impl TryFrom<RawTensorInfo> for TensorInfo {
    type Error = CodecError;

    fn try_from(raw: RawTensorInfo) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.element_type, raw.dimension)
    }
}

/// Ordered tensors of one frame plus the frame rate they share
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTensorsConfig")]
pub struct TensorsConfig {
    tensors: Vec<TensorInfo>,
    rate: FrameRate,
}

impl TensorsConfig {
    /// Create a config holding 1 to `TENSOR_SIZE_LIMIT` tensors
    pub fn new(tensors: Vec<TensorInfo>, rate: FrameRate) -> Result<Self, CodecError> {
        if tensors.is_empty() || tensors.len() > TENSOR_SIZE_LIMIT {
            return Err(CodecError::InvalidArgument(format!(
                "tensor count {} is outside 1..={}",
                tensors.len(),
                TENSOR_SIZE_LIMIT
            )));
        }
        Ok(Self { tensors, rate })
    }

    /// Tensors in wire order
    pub fn tensors(&self) -> &[TensorInfo] {
        &self.tensors
    }

    /// Number of tensors
    pub fn num_tensors(&self) -> usize {
        self.tensors.len()
    }

    /// Frame rate
    pub const fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Same tensors with another rate
    pub fn with_rate(mut self, rate: FrameRate) -> Self {
        self.rate = rate;
        self
    }
}

#[derive(Deserialize)]
struct RawTensorsConfig {
    tensors: Vec<TensorInfo>,
    rate: FrameRate,
}

impl TryFrom<RawTensorsConfig> for TensorsConfig {
    type Error = CodecError;

    fn try_from(raw: RawTensorsConfig) -> Result<Self, Self::Error> {
        Self::new(raw.tensors, raw.rate)
    }
}
