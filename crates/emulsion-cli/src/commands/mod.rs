//! CLI command implementations

pub mod apply;
pub mod histogram;
pub mod lut;
pub mod stocks;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Loads an image and converts it to a raw RGBA8 buffer.
pub fn load_rgba(path: &Path) -> Result<(Vec<u8>, u32, u32)> {
    let img = image::open(path)
        .with_context(|| format!("failed to load {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok((img.into_raw(), width, height))
}

/// Saves an RGBA8 buffer; the format follows the output extension.
/// JPEG output drops the alpha channel.
pub fn save_rgba(path: &Path, buf: Vec<u8>, width: u32, height: u32) -> Result<()> {
    let img = image::RgbaImage::from_raw(width, height, buf)
        .context("render buffer does not match image dimensions")?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "png" => img.save(path),
        "jpg" | "jpeg" => image::DynamicImage::ImageRgba8(img).to_rgb8().save(path),
        other => bail!("unsupported output format: .{other} (use png or jpeg)"),
    }
    .with_context(|| format!("failed to save {}", path.display()))
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}
