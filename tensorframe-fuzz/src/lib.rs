//! Fuzz entry points for tensorframe-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode

use bytes::Bytes;
use tensorframe_core::{
    constants::TrailerType,
    decoder::{decode_container, decode_container_zero_copy, peek_header},
    encoder::encode_container,
    parse_caps,
};

pub fn fuzz_decode(data: &[u8]) {
    // Both decode paths must agree and never panic
    let copied = decode_container(data);
    let shared = decode_container_zero_copy(Bytes::copy_from_slice(data));
    assert_eq!(copied.is_ok(), shared.is_ok());

    if let Ok(frame) = copied {
        assert!(peek_header(data).is_ok());

        // Anything that decodes must re-encode to the same body
        let input: Vec<&[u8]> = frame.buffers.iter().map(|b| b.as_ref()).collect();
        let trailer = frame.trailer_type();
        if let Ok(encoded) = encode_container(&frame.config, &input, trailer) {
            assert_eq!(&encoded[..], &data[..frame.size]);
        }
    }
}

pub fn fuzz_parse_caps(data: &[u8]) {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(parsed) = parse_caps(text) {
        if parsed.is_fully_determined() {
            // Fully determined descriptors always yield an encodable config
            if let Ok(config) = parsed.to_config() {
                let sizes: Option<Vec<usize>> =
                    config.tensors().iter().map(|t| t.byte_size()).collect();
                if let Some(sizes) = sizes.filter(|s| s.iter().sum::<usize>() <= 1 << 16) {
                    let buffers: Vec<Vec<u8>> = sizes.iter().map(|&n| vec![0u8; n]).collect();
                    let input: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();
                    assert!(encode_container(&config, &input, TrailerType::None).is_ok());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_decode_empty() {
        fuzz_decode(&[]);
    }

    #[test]
    fn test_fuzz_decode_random() {
        fuzz_decode(&[0x12, 0x34, 0x56, 0x78]);
        fuzz_decode(b"TNSF\x01\x00\x00\x01\x00\x00\x00\x1e\x00\x00\x00\x01");
    }

    #[test]
    fn test_fuzz_decode_valid_container() {
        use tensorframe_core::{ElementType, FrameRate, TensorInfo, TensorsConfig};

        let config = TensorsConfig::new(
            vec![TensorInfo::named("x", ElementType::Int8, &[3]).unwrap()],
            FrameRate::new(30, 1).unwrap(),
        )
        .unwrap();
        let encoded = encode_container(&config, &[&[1u8, 2, 3][..]], TrailerType::Blake3).unwrap();
        fuzz_decode(&encoded);
    }

    #[test]
    fn test_fuzz_parse_caps() {
        fuzz_parse_caps(&[]);
        fuzz_parse_caps(&[0xFF; 64]);
        fuzz_parse_caps(b"other/tensor, dim1=(int)4, type=(string)int32");
        fuzz_parse_caps(
            b"other/tensors, num_tensors=(int)2, dimensions=\"2:2,3\", types=\"uint8,float32\"",
        );
    }
}
