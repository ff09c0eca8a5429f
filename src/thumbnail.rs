//! Thumbnail processing: bounded resize to JPEG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

/// Bounds for processed thumbnails.
#[derive(Debug, Clone)]
pub struct ThumbnailSpec {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality, 1-100.
    pub quality: u8,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            max_width: 500,
            max_height: 500,
            quality: 85,
        }
    }
}

/// Resize `source` to fit the spec bounds (aspect ratio preserved) and write
/// it to `dest` as JPEG.
pub fn process_image(source: &Path, dest: &Path, spec: &ThumbnailSpec) -> Result<()> {
    let img = image::open(source)
        .with_context(|| format!("Failed to open image: {}", source.display()))?;

    let resized = img.thumbnail(spec.max_width, spec.max_height);
    let rgb = resized.to_rgb8();

    let file = File::create(dest)
        .with_context(|| format!("Failed to create thumbnail file: {}", dest.display()))?;
    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), spec.quality);
    encoder
        .encode_image(&rgb)
        .context("Failed to encode thumbnail JPEG")?;

    debug!("Processed thumbnail saved to {}", dest.display());
    Ok(())
}
