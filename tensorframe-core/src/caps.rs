//! Capability descriptor parsing and rendering
//!
//! A capability descriptor is a single structure of the form
//!
//! ```text
//! other/tensor, rank=(int)2, dim1=(int)3, dim2=(int)2, type=(string)uint8, framerate=(fraction)30/1
//! other/tensors, num_tensors=(int)2, dimensions=(string)"3:2,2", types=(string)"uint8,float32"
//! ```
//!
//! Parsing is lenient on a per-field basis: an unknown element type or a bad
//! frame rate is reported through [`ParsedCaps::failed`] while the remaining
//! fields are still populated. Inconsistent dimension fields are a hard error.

use crate::constants::{RANK_LIMIT, TENSOR_SIZE_LIMIT};
use crate::error::CodecError;
use crate::types::{Dimension, ElementType, FrameRate, TensorInfo, TensorsConfig};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Media type for a single tensor descriptor
pub const MEDIA_TENSOR: &str = "other/tensor";

/// Media type for a multi-tensor descriptor
pub const MEDIA_TENSORS: &str = "other/tensors";

/// Which descriptor fields were determined (stored as a single byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CheckStatus(u8);

impl CheckStatus {
    /// Nothing determined
    pub const INIT: u8 = 0b0000_0000;

    /// Dimension fields
    pub const DIMENSION: u8 = 0b0000_0001;

    /// Element type field
    pub const TYPE: u8 = 0b0000_0010;

    /// Dimension and type together
    pub const ALL: u8 = Self::DIMENSION | Self::TYPE;

    /// Frame rate field
    pub const FRAMERATE: u8 = 0b0000_0100;

    /// Create a status from a raw byte
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// Get raw status byte
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Check that every bit in `bits` is set
    pub const fn contains(&self, bits: u8) -> bool {
        (self.0 & bits) == bits
    }

    /// Check that no bit is set
    pub const fn is_empty(&self) -> bool {
        self.0 == Self::INIT
    }

    /// Set the given bits
    pub fn insert(&mut self, bits: u8) {
        self.0 |= bits;
    }

    /// Check if the dimension bit is set
    pub const fn has_dimension(&self) -> bool {
        self.contains(Self::DIMENSION)
    }

    /// Check if the type bit is set
    pub const fn has_type(&self) -> bool {
        self.contains(Self::TYPE)
    }

    /// Check if the frame rate bit is set
    pub const fn has_framerate(&self) -> bool {
        self.contains(Self::FRAMERATE)
    }
}

/// One key/value pair of a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field name
    pub key: &'a str,
    /// Optional `(type)` annotation in front of the value
    pub type_hint: Option<&'a str>,
    /// Value with surrounding quotes removed
    pub value: &'a str,
}

/// A tokenised capability structure borrowing from its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure<'a> {
    media_type: &'a str,
    fields: Vec<Field<'a>>,
}

impl<'a> Structure<'a> {
    /// Split `text` into its media type and fields
    pub fn parse(text: &'a str) -> Result<Self, CodecError> {
        let text = text.trim();
        let text = text.strip_suffix(';').unwrap_or(text).trim_end();
        let mut segments = split_outside_quotes(text)?.into_iter();

        let media_type = segments.next().unwrap_or("").trim();
        if media_type.is_empty() || media_type.contains('=') {
            return Err(CodecError::InvalidArgument(format!(
                "capability '{}' does not start with a media type",
                text
            )));
        }

        let fields = segments
            .map(parse_field)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { media_type, fields })
    }

    /// Media type name
    pub fn media_type(&self) -> &'a str {
        self.media_type
    }

    /// All fields, in source order
    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// Value of the last field named `key`
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .rev()
            .find(|f| f.key == key)
            .map(|f| f.value)
    }

    /// Check whether a field named `key` exists
    pub fn has(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }
}

fn split_outside_quotes(text: &str) -> Result<Vec<&str>, CodecError> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quote = false;

    for (i, c) in text.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            ',' if !in_quote => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_quote {
        return Err(CodecError::InvalidArgument(format!(
            "unterminated quote in '{}'",
            text
        )));
    }
    segments.push(&text[start..]);
    Ok(segments)
}

fn parse_field(segment: &str) -> Result<Field<'_>, CodecError> {
    let (key, rest) = segment.split_once('=').ok_or_else(|| {
        CodecError::InvalidArgument(format!("field '{}' has no value", segment.trim()))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(CodecError::InvalidArgument(format!(
            "field '{}' has no name",
            segment.trim()
        )));
    }

    let mut rest = rest.trim();
    let mut type_hint = None;
    if let Some(after_paren) = rest.strip_prefix('(') {
        let (hint, value) = after_paren.split_once(')').ok_or_else(|| {
            CodecError::InvalidArgument(format!("unterminated type annotation in '{}'", key))
        })?;
        type_hint = Some(hint.trim());
        rest = value.trim();
    }

    let value = match rest.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').ok_or_else(|| {
            CodecError::InvalidArgument(format!("stray quote in value of '{}'", key))
        })?,
        None => rest,
    };

    Ok(Field {
        key,
        type_hint,
        value,
    })
}

/// Per-tensor result of parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTensor {
    /// Shape, if the dimension fields determined one
    pub dimension: Option<Dimension>,
    /// Element type; `Unknown` when missing or unrecognized
    pub element_type: ElementType,
}

impl Default for ParsedTensor {
    fn default() -> Self {
        Self {
            dimension: None,
            element_type: ElementType::Unknown,
        }
    }
}

/// Best-effort metadata extracted from a capability descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCaps {
    /// Media type of the structure
    pub media_type: String,
    /// Tensors in declaration order
    pub tensors: Vec<ParsedTensor>,
    /// Frame rate, `None` when absent or unusable
    pub rate: Option<FrameRate>,
    /// Fields that were determined
    pub status: CheckStatus,
    /// Fields that were present but could not be used
    pub failed: CheckStatus,
}

impl ParsedCaps {
    /// Whether every tensor's dimension and type were determined
    pub fn is_fully_determined(&self) -> bool {
        self.status.contains(CheckStatus::ALL) && !self.failed.has_type()
    }

    /// Convert into a validated config (tensors are unnamed; missing rate becomes 0/1)
    pub fn to_config(&self) -> Result<TensorsConfig, CodecError> {
        let tensors = self
            .tensors
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let dimension = t.dimension.ok_or_else(|| {
                    CodecError::InvalidShape(format!("dimension of tensor {} is undetermined", i))
                })?;
                TensorInfo::new(None, t.element_type, dimension)
            })
            .collect::<Result<Vec<_>, _>>()?;

        TensorsConfig::new(tensors, self.rate.unwrap_or(FrameRate::UNKNOWN))
    }
}

/// Parse a capability descriptor into metadata plus presence flags
///
/// Structures carrying `num_tensors`, `dimensions` or `types` are read in
/// multi-tensor mode; anything else is read as a single tensor using
/// `rank`, `dim1`..`dim4` and `type`.
pub fn parse_caps(text: &str) -> Result<ParsedCaps, CodecError> {
    let structure = Structure::parse(text)?;
    let mut status = CheckStatus::default();
    let mut failed = CheckStatus::default();

    let multi = ["num_tensors", "dimensions", "types"]
        .iter()
        .any(|k| structure.has(k));

    let tensors = if multi {
        parse_multi(&structure, &mut status, &mut failed)?
    } else {
        vec![parse_single(&structure, &mut status, &mut failed)?]
    };

    let rate = match structure.get("framerate") {
        Some(value) => match FrameRate::parse(value) {
            Ok(rate) => {
                status.insert(CheckStatus::FRAMERATE);
                Some(rate)
            }
            Err(_e) => {
                #[cfg(feature = "logging")]
                warn!("Ignoring framerate '{}': {:?}", value, _e);
                failed.insert(CheckStatus::FRAMERATE);
                None
            }
        },
        None => None,
    };

    #[cfg(feature = "logging")]
    debug!(
        "Parsed {} caps: {} tensor(s), status {:#04b}, failed {:#04b}",
        structure.media_type(),
        tensors.len(),
        status.as_u8(),
        failed.as_u8()
    );

    Ok(ParsedCaps {
        media_type: structure.media_type().to_string(),
        tensors,
        rate,
        status,
        failed,
    })
}

fn parse_extent(key: &str, value: &str) -> Result<u32, CodecError> {
    match value.trim().parse::<u32>() {
        Ok(extent) if extent > 0 => Ok(extent),
        _ => Err(CodecError::MalformedDimension(format!(
            "{} = '{}' is not a positive extent",
            key, value
        ))),
    }
}

fn parse_single(
    structure: &Structure<'_>,
    status: &mut CheckStatus,
    failed: &mut CheckStatus,
) -> Result<ParsedTensor, CodecError> {
    let rank = match structure.get("rank") {
        Some(value) => match value.trim().parse::<usize>() {
            Ok(rank) if (1..=RANK_LIMIT).contains(&rank) => Some(rank),
            _ => {
                return Err(CodecError::MalformedDimension(format!(
                    "rank '{}' is outside 1..={}",
                    value, RANK_LIMIT
                )))
            }
        },
        None => None,
    };

    let mut extents: [Option<u32>; RANK_LIMIT] = [None; RANK_LIMIT];
    for field in structure.fields() {
        let Some(index) = field.key.strip_prefix("dim") else {
            continue;
        };
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        if index == 0 || index > RANK_LIMIT {
            return Err(CodecError::MalformedDimension(format!(
                "{} is beyond the rank limit {}",
                field.key, RANK_LIMIT
            )));
        }
        extents[index - 1] = Some(parse_extent(field.key, field.value)?);
    }

    let declared = match rank {
        Some(rank) => {
            for (i, extent) in extents.iter().enumerate() {
                match (i < rank, extent) {
                    (true, None) => {
                        return Err(CodecError::MalformedDimension(format!(
                            "rank {} declared but dim{} is missing",
                            rank,
                            i + 1
                        )))
                    }
                    (false, Some(_)) => {
                        return Err(CodecError::MalformedDimension(format!(
                            "dim{} is beyond the declared rank {}",
                            i + 1,
                            rank
                        )))
                    }
                    _ => {}
                }
            }
            rank
        }
        None => {
            let leading = extents.iter().take_while(|e| e.is_some()).count();
            if extents[leading..].iter().any(|e| e.is_some()) {
                return Err(CodecError::MalformedDimension(format!(
                    "dim{} is missing between declared dimensions",
                    leading + 1
                )));
            }
            leading
        }
    };

    let dimension = if declared > 0 {
        let values: Vec<u32> = extents[..declared].iter().flatten().copied().collect();
        let dimension = Dimension::new(&values).map_err(|_| {
            CodecError::MalformedDimension(format!("extents {:?} do not form a shape", values))
        })?;
        status.insert(CheckStatus::DIMENSION);
        Some(dimension)
    } else {
        None
    };

    let element_type = match structure.get("type") {
        Some(name) => {
            let ty = ElementType::from_name(name.trim());
            if ty.is_known() {
                status.insert(CheckStatus::TYPE);
            } else {
                #[cfg(feature = "logging")]
                warn!("Unrecognized tensor type '{}'", name);
                failed.insert(CheckStatus::TYPE);
            }
            ty
        }
        None => ElementType::Unknown,
    };

    Ok(ParsedTensor {
        dimension,
        element_type,
    })
}

fn parse_multi(
    structure: &Structure<'_>,
    status: &mut CheckStatus,
    failed: &mut CheckStatus,
) -> Result<Vec<ParsedTensor>, CodecError> {
    let num_tensors = match structure.get("num_tensors") {
        Some(value) => match value.trim().parse::<usize>() {
            Ok(n) if (1..=TENSOR_SIZE_LIMIT).contains(&n) => Some(n),
            _ => {
                return Err(CodecError::InvalidArgument(format!(
                    "num_tensors '{}' is outside 1..={}",
                    value, TENSOR_SIZE_LIMIT
                )))
            }
        },
        None => None,
    };

    let dimensions = match structure.get("dimensions") {
        Some(value) => Some(
            value
                .split(',')
                .map(|entry| {
                    Dimension::parse(entry.trim()).map_err(|_| {
                        CodecError::MalformedDimension(format!(
                            "'{}' is not a dimension",
                            entry.trim()
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    let types: Option<Vec<ElementType>> = structure.get("types").map(|value| {
        value
            .split(',')
            .map(|name| ElementType::from_name(name.trim()))
            .collect()
    });

    let count = num_tensors
        .or_else(|| dimensions.as_ref().map(Vec::len))
        .or_else(|| types.as_ref().map(Vec::len))
        .unwrap_or(0);

    if count == 0 || count > TENSOR_SIZE_LIMIT {
        return Err(CodecError::InvalidArgument(format!(
            "tensor count {} is outside 1..={}",
            count, TENSOR_SIZE_LIMIT
        )));
    }

    if let Some(dims) = &dimensions {
        if dims.len() != count {
            return Err(CodecError::MalformedDimension(format!(
                "{} dimensions listed for {} tensors",
                dims.len(),
                count
            )));
        }
        status.insert(CheckStatus::DIMENSION);
    }

    let mut tensors = vec![ParsedTensor::default(); count];
    if let Some(dims) = &dimensions {
        for (tensor, dim) in tensors.iter_mut().zip(dims) {
            tensor.dimension = Some(*dim);
        }
    }

    if let Some(types) = types {
        if types.len() != count {
            #[cfg(feature = "logging")]
            warn!("{} types listed for {} tensors", types.len(), count);
            failed.insert(CheckStatus::TYPE);
        } else {
            for (tensor, ty) in tensors.iter_mut().zip(&types) {
                tensor.element_type = *ty;
            }
            if types.iter().all(ElementType::is_known) {
                status.insert(CheckStatus::TYPE);
            } else {
                #[cfg(feature = "logging")]
                warn!("Unrecognized tensor type in '{:?}'", structure.get("types"));
                failed.insert(CheckStatus::TYPE);
            }
        }
    }

    Ok(tensors)
}

/// Render a multi-tensor descriptor that [`parse_caps`] reads back into `config`
pub fn tensors_caps_string(media_type: &str, config: &TensorsConfig) -> String {
    let dimensions = config
        .tensors()
        .iter()
        .map(|t| t.dimension().to_string())
        .collect::<Vec<_>>()
        .join(",");
    let types = config
        .tensors()
        .iter()
        .map(|t| t.element_type().name())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}, num_tensors=(int){}, dimensions=(string)\"{}\", types=(string)\"{}\", framerate=(fraction){}",
        media_type,
        config.num_tensors(),
        dimensions,
        types,
        config.rate()
    )
}

/// Render a single-tensor descriptor
pub fn tensor_caps_string(info: &TensorInfo, rate: FrameRate) -> String {
    let mut out = format!("{}, rank=(int){}", MEDIA_TENSOR, info.dimension().rank());
    for (i, extent) in info.dimension().declared().iter().enumerate() {
        out.push_str(&format!(", dim{}=(int){}", i + 1, extent));
    }
    out.push_str(&format!(
        ", type=(string){}, framerate=(fraction){}",
        info.element_type(),
        rate
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_tokenizer() {
        let s = Structure::parse(
            r#"other/tensors, num_tensors=(int)2, dimensions=(string)"3:2,2", types=uint8;"#,
        )
        .unwrap();
        assert_eq!(s.media_type(), "other/tensors");
        assert_eq!(s.fields().len(), 3);
        assert_eq!(s.fields()[0].type_hint, Some("int"));
        assert_eq!(s.get("dimensions"), Some("3:2,2"));
        assert_eq!(s.get("types"), Some("uint8"));
        assert_eq!(s.fields()[2].type_hint, None);
    }

    #[test]
    fn test_structure_errors() {
        assert!(matches!(
            Structure::parse(""),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(matches!(
            Structure::parse("rank=2"),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(matches!(
            Structure::parse("other/tensor, rank"),
            Err(CodecError::InvalidArgument(_))
        ));
        assert!(matches!(
            Structure::parse(r#"other/tensors, types="uint8"#),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_tensor_full() {
        let caps = parse_caps(
            "other/tensor, rank=(int)2, dim1=(int)3, dim2=(int)2, type=(string)uint8, framerate=(fraction)30/1",
        )
        .unwrap();

        assert_eq!(caps.media_type, MEDIA_TENSOR);
        assert_eq!(caps.tensors.len(), 1);
        assert_eq!(caps.tensors[0].dimension, Some(Dimension::new(&[3, 2]).unwrap()));
        assert_eq!(caps.tensors[0].element_type, ElementType::Uint8);
        assert_eq!(caps.rate, Some(FrameRate::new(30, 1).unwrap()));
        assert!(caps.status.contains(CheckStatus::ALL | CheckStatus::FRAMERATE));
        assert!(caps.failed.is_empty());
        assert!(caps.is_fully_determined());
    }

    #[test]
    fn test_missing_rate_is_undetermined() {
        let caps = parse_caps("other/tensor, dim1=4, type=float32").unwrap();
        assert_eq!(caps.rate, None);
        assert!(!caps.status.has_framerate());
        assert!(!caps.failed.has_framerate());

        let caps = parse_caps("other/tensor, dim1=4, type=float32, framerate=0/1").unwrap();
        assert_eq!(caps.rate, Some(FrameRate::UNKNOWN));
        assert!(caps.status.has_framerate());
    }

    #[test]
    fn test_unknown_type_is_partial() {
        let caps =
            parse_caps("other/tensor, rank=3, dim1=4, dim2=4, dim3=3, type=bfloat16").unwrap();
        assert_eq!(caps.tensors[0].dimension, Some(Dimension::new(&[4, 4, 3]).unwrap()));
        assert_eq!(caps.tensors[0].element_type, ElementType::Unknown);
        assert!(caps.status.has_dimension());
        assert!(!caps.status.has_type());
        assert!(caps.failed.has_type());
        assert!(!caps.is_fully_determined());
        assert!(matches!(caps.to_config(), Err(CodecError::UnknownType(_))));
    }

    #[test]
    fn test_bad_framerate_is_partial() {
        let caps = parse_caps("other/tensor, dim1=2, type=int8, framerate=30/0").unwrap();
        assert_eq!(caps.rate, None);
        assert!(caps.failed.has_framerate());
        assert!(caps.is_fully_determined());
    }

    #[test]
    fn test_dimension_beyond_rank_fails() {
        let result = parse_caps("other/tensor, rank=1, dim1=4, dim2=2, type=uint8");
        assert!(matches!(result, Err(CodecError::MalformedDimension(_))));
    }

    #[test]
    fn test_dimension_missing_for_rank_fails() {
        let result = parse_caps("other/tensor, rank=3, dim1=4, dim2=2, type=uint8");
        assert!(matches!(result, Err(CodecError::MalformedDimension(_))));
    }

    #[test]
    fn test_dimension_gap_fails() {
        let result = parse_caps("other/tensor, dim1=4, dim3=2, type=uint8");
        assert!(matches!(result, Err(CodecError::MalformedDimension(_))));
    }

    #[test]
    fn test_bad_rank_and_extent_fail() {
        for caps in [
            "other/tensor, rank=0",
            "other/tensor, rank=5",
            "other/tensor, rank=two",
            "other/tensor, dim1=0",
            "other/tensor, dim1=-3",
            "other/tensor, dim5=1",
        ] {
            assert!(
                matches!(parse_caps(caps), Err(CodecError::MalformedDimension(_))),
                "{}",
                caps
            );
        }
    }

    #[test]
    fn test_nothing_determined() {
        let caps = parse_caps("other/tensor").unwrap();
        assert_eq!(caps.tensors, vec![ParsedTensor::default()]);
        assert!(caps.status.is_empty());
        assert!(caps.failed.is_empty());
        assert!(matches!(caps.to_config(), Err(CodecError::InvalidShape(_))));
    }

    #[test]
    fn test_multi_tensor() {
        let caps = parse_caps(
            r#"other/tensors, num_tensors=(int)2, dimensions=(string)"3:2:1:1, 2", types=(string)"uint8, float32", framerate=(fraction)30/1"#,
        )
        .unwrap();

        assert_eq!(caps.tensors.len(), 2);
        assert_eq!(caps.tensors[0].dimension.unwrap().extents(), &[3, 2, 1, 1]);
        assert_eq!(caps.tensors[0].dimension.unwrap().rank(), 4);
        assert_eq!(caps.tensors[1].dimension.unwrap().rank(), 1);
        assert_eq!(caps.tensors[1].element_type, ElementType::Float32);
        assert!(caps.is_fully_determined());

        let config = caps.to_config().unwrap();
        assert_eq!(config.num_tensors(), 2);
        assert_eq!(config.rate(), FrameRate::new(30, 1).unwrap());
    }

    #[test]
    fn test_multi_tensor_count_mismatch() {
        let result = parse_caps(r#"other/tensors, num_tensors=3, dimensions="3:2,2""#);
        assert!(matches!(result, Err(CodecError::MalformedDimension(_))));

        let result = parse_caps(r#"other/tensors, num_tensors=0"#);
        assert!(matches!(result, Err(CodecError::InvalidArgument(_))));

        let result = parse_caps(r#"other/tensors, dimensions="3:x""#);
        assert!(matches!(result, Err(CodecError::MalformedDimension(_))));
    }

    #[test]
    fn test_multi_tensor_type_failures() {
        let caps = parse_caps(r#"other/tensors, dimensions="3,2", types="uint8""#).unwrap();
        assert!(caps.status.has_dimension());
        assert!(caps.failed.has_type());
        assert!(caps.tensors.iter().all(|t| t.element_type == ElementType::Unknown));

        let caps =
            parse_caps(r#"other/tensors, dimensions="3,2", types="uint8,complex64""#).unwrap();
        assert_eq!(caps.tensors[0].element_type, ElementType::Uint8);
        assert_eq!(caps.tensors[1].element_type, ElementType::Unknown);
        assert!(caps.failed.has_type());
    }

    #[test]
    fn test_render_and_parse_back() {
        let config = TensorsConfig::new(
            vec![
                TensorInfo::new(None, ElementType::Uint8, Dimension::new(&[3, 2, 1, 1]).unwrap())
                    .unwrap(),
                TensorInfo::new(None, ElementType::Float64, Dimension::new(&[7]).unwrap()).unwrap(),
            ],
            FrameRate::new(25, 2).unwrap(),
        )
        .unwrap();

        let text = tensors_caps_string(MEDIA_TENSORS, &config);
        let parsed = parse_caps(&text).unwrap();
        assert_eq!(parsed.to_config().unwrap(), config);

        let single = tensor_caps_string(&config.tensors()[1], config.rate());
        assert_eq!(
            single,
            "other/tensor, rank=(int)1, dim1=(int)7, type=(string)float64, framerate=(fraction)25/2"
        );
        let parsed = parse_caps(&single).unwrap();
        assert_eq!(parsed.tensors[0].element_type, ElementType::Float64);
        assert_eq!(parsed.tensors[0].dimension, Some(Dimension::new(&[7]).unwrap()));
    }
}
