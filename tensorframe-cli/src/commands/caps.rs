use anyhow::{bail, Context, Result};
use bytes::Bytes;
use colored::*;
use tensorframe_core::{
    caps::ParsedCaps, codec::TensorCodec, decoder::decode_container_zero_copy, parse_caps,
    TensorFrameCodec,
};
use tracing::info;

use super::read_input;

/// Parse a capability string, failing on malformed dimension fields
pub fn describe(text: &str) -> Result<ParsedCaps> {
    parse_caps(text).with_context(|| format!("Failed to parse caps '{}'", text))
}

/// Advertisement for the stream a stored container belongs to
pub fn advertise_container(data: Vec<u8>) -> Result<String> {
    let frame =
        decode_container_zero_copy(Bytes::from(data)).context("Failed to decode container")?;
    Ok(TensorFrameCodec::with_trailer(frame.trailer_type()).advertise(&frame.config))
}

fn mark(determined: bool, failed: bool) -> ColoredString {
    match (determined, failed) {
        (true, _) => "✓".green(),
        (false, true) => "✗".red(),
        (false, false) => "-".yellow(),
    }
}

fn print_parsed(parsed: &ParsedCaps) {
    println!("\n=== Caps ===");
    println!("Media type: {}", parsed.media_type);
    println!(
        "{} dimension  {} type  {} framerate",
        mark(parsed.status.has_dimension(), parsed.failed.has_dimension()),
        mark(parsed.status.has_type(), parsed.failed.has_type()),
        mark(parsed.status.has_framerate(), parsed.failed.has_framerate()),
    );
    match parsed.rate {
        Some(rate) => println!("Frame rate: {}", rate),
        None => println!("Frame rate: {}", "undetermined".yellow()),
    }

    for (i, tensor) in parsed.tensors.iter().enumerate() {
        let dims = tensor
            .dimension
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!("[{}] {} [{}]", i, tensor.element_type, dims);
    }

    if parsed.is_fully_determined() {
        println!("\n{} Fully determined", "✓".green());
    } else {
        println!("\n{} Partially determined", "!".yellow());
    }
}

pub fn execute(describe_text: Option<&str>, input: Option<&str>) -> Result<()> {
    match (describe_text, input) {
        (Some(text), None) => {
            info!("Describing caps");
            let parsed = describe(text)?;
            print_parsed(&parsed);
        }
        (None, Some(path)) => {
            info!("Advertising container: {}", path);
            let data = read_input(path)?;
            println!("{}", advertise_container(data)?);
        }
        _ => bail!("Exactly one of --describe or --input is required"),
    }
    Ok(())
}
