//! Basic encoding example

use tensorframe_core::{ContainerBuilder, ElementType, FrameRate, TensorInfo, TensorsConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Tensorframe Basic Encoding Example\n");

    let config = TensorsConfig::new(
        vec![
            TensorInfo::named("input", ElementType::Uint8, &[3, 2, 1, 1])?,
            TensorInfo::named("scores", ElementType::Float32, &[2])?,
        ],
        FrameRate::new(30, 1)?,
    )?;

    let pixels = [1u8, 2, 3, 4, 5, 6];
    let scores: Vec<u8> = [0.25f32, 0.75].iter().flat_map(|v| v.to_ne_bytes()).collect();

    let encoded = ContainerBuilder::new(&config)
        .tensor_data(&pixels)
        .tensor_data(&scores)
        .with_blake3()
        .build()?;

    for (i, info) in config.tensors().iter().enumerate() {
        println!(
            "Tensor {}: {:?} {} [{}] ({} bytes)",
            i,
            info.name().unwrap_or(""),
            info.element_type(),
            info.dimension(),
            info.byte_size().unwrap_or(0)
        );
    }

    std::fs::write("example_output.tnsf", &encoded)?;

    println!("\nWrote {} bytes to example_output.tnsf", encoded.len());
    println!("Header: {}", hex::encode(&encoded[..16]));
    println!("Use 'tensorframe inspect --input example_output.tnsf' to read it back");

    Ok(())
}
