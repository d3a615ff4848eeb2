//! Layer infrastructure for compositing a folder icon.
//!
//! Rendering runs a fixed sequence of layers over a shared
//! [`RenderContext`]. Each layer config implements [`LayerEffect`], which
//! defines:
//! - How the layer draws itself onto the canvas
//! - What properties it emits for downstream layers
//!
//! Properties flow through the pipeline via the context, so the imprint and
//! label layers learn the folder's tint without knowing which template drew
//! it.
//!
//! ```text
//! transparent canvas
//!     │
//!     ▼
//! ┌──────────┐
//! │  Folder  │ ──► emits FolderTint
//! └────┬─────┘
//!      ▼
//! ┌──────────┐
//! │ Imprint  │ ◄── consumes FolderTint (user icon)
//! └────┬─────┘
//!      ▼
//! ┌──────────┐
//! │  Label   │ ◄── consumes FolderTint (label text)
//! └──────────┘
//! ```

pub mod folder;
pub mod imprint;
pub mod label;
pub mod svg;

pub use folder::FolderLayer;
pub use imprint::ImprintLayer;
pub use label::LabelLayer;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use image::RgbaImage;

use crate::error::Result;
use crate::icon::RectPx;
use crate::template::Rgb;

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the rendering pipeline.
///
/// Layers can read properties set by upstream layers and emit new properties
/// for downstream layers to consume.
pub struct RenderContext {
    /// The canvas being drawn.
    pub image: RgbaImage,

    /// Typed property bag for inter-layer communication.
    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RenderContext {
    /// Creates a new render context over the given canvas.
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            properties: HashMap::new(),
        }
    }

    /// Sets a typed property that downstream layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by an upstream layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    /// The folder tint, or the average color of `region` when no upstream
    /// layer emitted one.
    pub fn tint_or_sample(&self, region: RectPx) -> Rgb {
        self.get::<FolderTint>()
            .map(|t| t.0)
            .unwrap_or_else(|| sample_region_color(&self.image, region))
    }
}

// ============================================================================
// Common Properties
// ============================================================================

/// The base color of the folder body.
///
/// Emitted by the folder layer. Consumed by layers that color themselves to
/// match the folder (imprint, label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderTint(pub Rgb);

// ============================================================================
// Layer Trait
// ============================================================================

/// Trait for layer configurations that know how to draw themselves.
///
/// The separation of [`transform`](Self::transform) and [`emit`](Self::emit)
/// makes the data flow between layers explicit.
pub trait LayerEffect {
    /// Draws onto `ctx.image`, reading any properties set upstream.
    fn transform(&self, ctx: &mut RenderContext) -> Result<()>;

    /// Emits properties for downstream layers. Emits nothing by default.
    fn emit(&self, _ctx: &mut RenderContext) {}

    /// Runs [`transform`](Self::transform) then [`emit`](Self::emit).
    fn apply(&self, ctx: &mut RenderContext) -> Result<()> {
        self.transform(ctx)?;
        self.emit(ctx);
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Samples the alpha-weighted average color inside a region.
///
/// Returns mid gray for a fully transparent region.
pub fn sample_region_color(image: &RgbaImage, region: RectPx) -> Rgb {
    let mut total_r: u64 = 0;
    let mut total_g: u64 = 0;
    let mut total_b: u64 = 0;
    let mut total_a: u64 = 0;

    for y in region.y..region.bottom().min(image.height()) {
        for x in region.x..region.right().min(image.width()) {
            let pixel = image.get_pixel(x, y);
            let a = pixel[3] as u64;
            total_r += pixel[0] as u64 * a;
            total_g += pixel[1] as u64 * a;
            total_b += pixel[2] as u64 * a;
            total_a += a;
        }
    }

    if total_a == 0 {
        return (128, 128, 128);
    }

    (
        (total_r / total_a) as u8,
        (total_g / total_a) as u8,
        (total_b / total_a) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn context_properties() {
        let mut ctx = RenderContext::new(RgbaImage::new(4, 4));
        assert!(ctx.get::<FolderTint>().is_none());

        ctx.set(FolderTint((1, 2, 3)));
        assert_eq!(ctx.get::<FolderTint>(), Some(&FolderTint((1, 2, 3))));
    }

    #[test]
    fn tint_falls_back_to_sampling() {
        let ctx = RenderContext::new(RgbaImage::from_pixel(8, 8, Rgba([200, 100, 50, 255])));
        assert_eq!(ctx.tint_or_sample(RectPx::new(2, 2, 4, 4)), (200, 100, 50));

        let mut ctx = ctx;
        ctx.set(FolderTint((9, 9, 9)));
        assert_eq!(ctx.tint_or_sample(RectPx::new(2, 2, 4, 4)), (9, 9, 9));
    }

    #[test]
    fn sample_ignores_transparent_pixels() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 0]));
        assert_eq!(sample_region_color(&img, RectPx::new(0, 0, 2, 1)), (255, 0, 0));

        let empty = RgbaImage::new(2, 2);
        assert_eq!(sample_region_color(&empty, RectPx::new(0, 0, 2, 2)), (128, 128, 128));
    }
}
