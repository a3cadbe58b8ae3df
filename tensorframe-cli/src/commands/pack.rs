use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tensorframe_core::{
    constants::TrailerType, encoder::ContainerBuilder, Dimension, ElementType, FrameRate,
    TensorInfo, TensorsConfig,
};
use tracing::info;

/// JSON description of one frame to pack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Frame rate as "n/d" or "n"; unknown (0/1) when omitted
    #[serde(default)]
    pub framerate: Option<String>,
    /// Tensors in wire order
    pub tensors: Vec<ManifestTensor>,
}

/// One tensor of a [`Manifest`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestTensor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub element_type: String,
    /// Shape as "d1:d2:d3:d4", innermost first
    pub dims: String,
    /// Raw tensor bytes, hex encoded
    pub data: String,
}

impl Manifest {
    /// Validate the manifest and decode its payloads
    pub fn into_frame(self) -> Result<(TensorsConfig, Vec<Vec<u8>>)> {
        let rate = match self.framerate.as_deref() {
            Some(text) => FrameRate::parse(text)
                .with_context(|| format!("Invalid framerate '{}'", text))?,
            None => FrameRate::UNKNOWN,
        };

        let mut infos = Vec::with_capacity(self.tensors.len());
        let mut buffers = Vec::with_capacity(self.tensors.len());
        for (i, tensor) in self.tensors.into_iter().enumerate() {
            let element_type = ElementType::from_name(tensor.element_type.trim());
            if !element_type.is_known() {
                bail!("Tensor {}: unknown type '{}'", i, tensor.element_type);
            }
            let dimension = Dimension::parse(&tensor.dims)
                .with_context(|| format!("Tensor {}: invalid dims '{}'", i, tensor.dims))?;
            let data = hex::decode(tensor.data.trim())
                .with_context(|| format!("Tensor {}: data is not valid hex", i))?;

            let info = TensorInfo::new(tensor.name, element_type, dimension)
                .with_context(|| format!("Tensor {}: invalid description", i))?;
            infos.push(info);
            buffers.push(data);
        }

        let config = TensorsConfig::new(infos, rate).context("Invalid tensor list")?;
        Ok((config, buffers))
    }
}

pub fn execute(manifest: &str, output: &str, trailer: TrailerType) -> Result<()> {
    info!("Packing manifest {} into {}", manifest, output);

    let content = fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read manifest file: {}", manifest))?;

    let manifest: Manifest =
        serde_json::from_str(&content).with_context(|| "Failed to parse JSON manifest")?;

    info!("Found {} tensors to pack", manifest.tensors.len());

    let (config, buffers) = manifest.into_frame()?;
    let input: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();

    let encoded = ContainerBuilder::new(&config)
        .buffers(&input)
        .trailer(trailer)
        .build()
        .context("Failed to encode container")?;

    fs::write(output, &encoded)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Successfully packed {} tensors ({} bytes, {} trailer)",
        config.num_tensors(),
        encoded.len(),
        trailer.name()
    );

    Ok(())
}
