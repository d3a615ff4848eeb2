//! The rendered preview canvas.
//!
//! A [`Canvas`] is an owned RGBA buffer of fixed square size. The editor
//! replaces it wholesale on every configuration change; exporters only read
//! it.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::icon::SizePx;

/// Edge length in pixels of every rendered canvas.
pub const CANVAS_SIZE: u32 = 1024;

/// An immutable rendered folder icon.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Wraps rendered pixels.
    pub(crate) fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// A fully transparent canvas.
    pub fn blank() -> Self {
        Self::new(RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE))
    }

    /// The pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.pixels.width(), self.pixels.height())
    }

    /// A square downscaled copy, used for the smaller ICO resolutions.
    pub fn resized(&self, size: u32) -> RgbaImage {
        if size == self.pixels.width() && size == self.pixels.height() {
            return self.pixels.clone();
        }
        imageops::resize(&self.pixels, size, size, FilterType::Lanczos3)
    }
}
