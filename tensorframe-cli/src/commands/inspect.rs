use anyhow::{Context, Result};
use bytes::Bytes;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use tensorframe_core::{constants::TrailerType, decoder::decode_container_zero_copy};
use tracing::{info, warn};

use super::read_input;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorReport {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub dims: String,
    pub rank: usize,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectReport {
    pub size: usize,
    pub trailer: TrailerType,
    pub framerate: String,
    pub tensors: Vec<TensorReport>,
}

/// Decode a container and describe it; `dump` includes hex payloads
pub fn inspect_bytes(data: Vec<u8>, dump: bool) -> Result<InspectReport> {
    let frame =
        decode_container_zero_copy(Bytes::from(data)).context("Failed to decode container")?;

    let tensors = frame
        .config
        .tensors()
        .iter()
        .zip(&frame.buffers)
        .enumerate()
        .map(|(index, (info, buffer))| TensorReport {
            index,
            name: info.name().unwrap_or("").to_string(),
            element_type: info.element_type().to_string(),
            dims: info.dimension().to_string(),
            rank: info.dimension().rank(),
            bytes: buffer.len(),
            data: dump.then(|| hex::encode(buffer)),
        })
        .collect();

    Ok(InspectReport {
        size: frame.size,
        trailer: frame.trailer_type(),
        framerate: frame.config.rate().to_string(),
        tensors,
    })
}

pub fn execute(input: &str, json: Option<&str>, dump: bool) -> Result<()> {
    info!("Inspecting container: {}", input);

    let data = read_input(input)?;
    let total = data.len();
    let report = inspect_bytes(data, dump)?;

    if report.size < total {
        warn!("{} trailing bytes after container ignored", total - report.size);
    }

    println!("\n=== Container ===");
    println!("Size:       {} bytes", report.size);
    println!("Trailer:    {}", report.trailer.name());
    println!("Frame rate: {}", report.framerate);
    println!("Tensors:    {}", report.tensors.len().to_string().green());
    println!();

    for tensor in &report.tensors {
        let name = if tensor.name.is_empty() {
            "(unnamed)".dimmed().to_string()
        } else {
            tensor.name.bold().to_string()
        };
        println!(
            "[{}] {} {} [{}] {} bytes",
            tensor.index, name, tensor.element_type, tensor.dims, tensor.bytes
        );
        if let Some(hex) = &tensor.data {
            println!("    {}", hex);
        }
    }

    if let Some(json_path) = json {
        let text = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize container report")?;

        fs::write(json_path, text)
            .with_context(|| format!("Failed to write output file: {}", json_path))?;

        info!("Container report written to: {}", json_path);
    }

    println!("\n{} Container is valid", "✓".green());
    Ok(())
}
