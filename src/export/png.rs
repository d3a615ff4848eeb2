//! PNG exporter.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use super::{ExportFormat, ExportedFile};
use crate::canvas::Canvas;
use crate::error::Result;

/// Encodes RGBA pixels as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Encodes the canvas as `<stem>.png`.
pub fn export_png(canvas: &Canvas, stem: &str) -> Result<ExportedFile> {
    let bytes = encode_png(canvas.pixels())?;
    Ok(ExportedFile::new(stem, ExportFormat::Png, bytes))
}
