//! Geometry helpers and the user-supplied icon file.
//!
//! An [`IconFile`] is what a drop or paste hands to the editor: raw bytes
//! plus the MIME type the source reported. Only files whose MIME type names
//! image content are ever accepted as the folder's icon.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A rectangle defined in pixel coordinates.
///
/// Used for the fixed regions of a folder template (icon placement, label
/// strip) on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: u32,
    /// Y offset from the top edge of the canvas
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns true if the point lies inside the rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Largest size with the aspect ratio of `content` that fits inside this
    /// rectangle. Never returns a zero dimension for non-empty content.
    pub fn fit(&self, content: SizePx) -> SizePx {
        if content.width == 0 || content.height == 0 {
            return SizePx::new(0, 0);
        }
        let scale = (self.width as f64 / content.width as f64)
            .min(self.height as f64 / content.height as f64);
        SizePx::new(
            ((content.width as f64 * scale).round() as u32).clamp(1, self.width.max(1)),
            ((content.height as f64 * scale).round() as u32).clamp(1, self.height.max(1)),
        )
    }

    /// Top-left position that centers `size` inside this rectangle.
    pub fn centered(&self, size: SizePx) -> (i32, i32) {
        (
            self.x as i32 + (self.width as i32 - size.width as i32) / 2,
            self.y as i32 + (self.height as i32 - size.height as i32) / 2,
        )
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// IconFile
// ============================================================================

/// A file offered to the editor by a drop or a paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct IconFile {
    /// Original file name, when the source provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type as reported by the source (e.g. `image/png`).
    pub mime_type: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl IconFile {
    /// Creates a file from its MIME type and contents.
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Sets the original file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let mut file = Self::new(mime_type_for_path(path), bytes);
        file.name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        Ok(file)
    }

    /// Returns true if the MIME type names image content.
    pub fn is_image(&self) -> bool {
        self.mime_type.to_ascii_lowercase().contains("image")
    }

    /// Returns true for SVG documents, which are rasterized rather than decoded.
    pub fn is_svg(&self) -> bool {
        self.mime_type.to_ascii_lowercase().contains("svg")
    }
}

/// Guesses a MIME type from a path's extension.
///
/// Unknown or missing extensions map to `application/octet-stream`, which
/// the editor rejects as an icon.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        Some("tif" | "tiff") => "image/tiff",
        Some("svg") => "image/svg+xml",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
