//! Negotiate a stream description, then encode and decode frames through the registry

use bytes::BytesMut;
use tensorframe_core::{parse_caps, CodecRegistry, TensorFrameCodec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Tensorframe Negotiation Example\n");

    let upstream = "other/tensors, num_tensors=(int)2, \
                    dimensions=(string)\"3:2:1:1,2:1:1:1\", \
                    types=(string)\"uint8,float32\", framerate=(fraction)30/1";

    let parsed = parse_caps(upstream)?;
    println!(
        "Parsed {} tensor(s), status {:#05b}, failed {:#05b}",
        parsed.tensors.len(),
        parsed.status.as_u8(),
        parsed.failed.as_u8()
    );
    let config = parsed.to_config()?;

    let mut registry = CodecRegistry::with_defaults();
    println!("Registered codecs: {:?}", registry.names());

    let codec = registry
        .get(TensorFrameCodec::MODE_NAME)
        .ok_or("tensorframe codec missing")?;
    println!("Downstream caps: {}\n", codec.advertise(&config));

    let first = [1u8, 2, 3, 4, 5, 6];
    let second: Vec<u8> = [1.0f32, 2.0].iter().flat_map(|v| v.to_ne_bytes()).collect();

    // One output buffer serves every frame; it is only grown when too small.
    let mut out = BytesMut::new();
    for frame in 0..3 {
        let written = codec.encode(&config, &[&first[..], &second[..]], &mut out)?;
        let decoded = codec.decode(out.split().freeze())?;
        println!(
            "Frame {}: {} bytes, {} tensor(s) at {}",
            frame,
            written,
            decoded.config.num_tensors(),
            decoded.config.rate()
        );
    }

    registry.unregister(TensorFrameCodec::MODE_NAME);
    println!("\nRegistry empty after shutdown: {}", registry.is_empty());

    Ok(())
}
