//! ICO exporter.
//!
//! Builds a standard multi-resolution icon container with PNG-compressed
//! entries through `image`'s [`IcoEncoder`]. All integers are little-endian:
//!
//! ```text
//! header    reserved(2)=0  type(2)=1  count(2)=N
//! entry*N   width(1) height(1) colorCount(1)=0 reserved(1)=0
//!           planes(2)=0 bitCount(2)=32 bytesInRes(4) imageOffset(4)
//! payload*N PNG bytes, in directory order
//! ```
//!
//! A width or height of 256 is stored as 0.

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::ExtendedColorType;

use super::png::encode_png;
use super::{ExportFormat, ExportedFile};
use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// Resolutions embedded in every exported icon, largest first.
pub const ICO_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

/// Largest edge the directory can describe.
pub const MAX_ICO_SIZE: u32 = 256;

/// Size of the fixed header.
pub const HEADER_LEN: usize = 6;

/// Size of one directory entry.
pub const ENTRY_LEN: usize = 16;

/// One encoded resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoImage {
    /// Edge length in pixels (square).
    pub size: u32,
    /// PNG payload.
    pub png: Vec<u8>,
}

impl IcoImage {
    fn frame(&self) -> Result<IcoFrame<'_>> {
        Ok(IcoFrame::with_encoded(
            self.png.as_slice(),
            self.size,
            self.size,
            ExtendedColorType::Rgba8,
        )?)
    }
}

/// Renders every size from `sizes` off the canvas and encodes it.
///
/// Sizes are clamped to `1..=256` and deduplicated, keeping their order.
pub fn encode_resolutions(canvas: &Canvas, sizes: &[u32]) -> Result<Vec<IcoImage>> {
    let mut images: Vec<IcoImage> = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let size = size.clamp(1, MAX_ICO_SIZE);
        if images.iter().any(|img| img.size == size) {
            continue;
        }
        let png = encode_png(&canvas.resized(size))?;
        tracing::debug!(size, bytes = png.len(), "encoded ICO resolution");
        images.push(IcoImage { size, png });
    }
    Ok(images)
}

/// Assembles the ICO container: header, directory, then payloads.
///
/// Fails with [`Error::NoIcoResolutions`] when `images` is empty.
pub fn encode_ico(images: &[IcoImage]) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(Error::NoIcoResolutions);
    }

    let frames = images
        .iter()
        .map(IcoImage::frame)
        .collect::<Result<Vec<_>>>()?;

    let payload_len: usize = images.iter().map(|img| img.png.len()).sum();
    let mut out = Vec::with_capacity(HEADER_LEN + ENTRY_LEN * images.len() + payload_len);
    IcoEncoder::new(&mut out).encode_images(&frames)?;
    Ok(out)
}

/// Encodes the canvas as `<stem>.ico` with the standard resolutions.
pub fn export_ico(canvas: &Canvas, stem: &str) -> Result<ExportedFile> {
    export_ico_with_sizes(canvas, stem, &ICO_SIZES)
}

/// Encodes the canvas as `<stem>.ico` with the given resolutions.
pub fn export_ico_with_sizes(canvas: &Canvas, stem: &str, sizes: &[u32]) -> Result<ExportedFile> {
    let images = encode_resolutions(canvas, sizes)?;
    let bytes = encode_ico(&images)?;
    Ok(ExportedFile::new(stem, ExportFormat::Ico, bytes))
}
