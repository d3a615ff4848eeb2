//! Icon imprint layer: places the user's icon on the folder.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use palette::{Hsl, IntoColor, Srgb};

use super::svg::composite_over;
use super::{LayerEffect, RenderContext};
use crate::error::Result;
use crate::icon::{RectPx, SizePx};
use crate::template::{ImprintStyle, Rgb};

/// How much darker than the folder tint a silhouette is drawn.
const IMPRINT_DARKEN: f32 = 0.18;

// ============================================================================
// ImprintLayer
// ============================================================================

/// Fits the decoded icon into a region and composites it.
///
/// The icon keeps its aspect ratio and is centered in `region`. With
/// [`ImprintStyle::Silhouette`] every pixel takes the darkened folder tint
/// and keeps only its alpha; with [`ImprintStyle::FullColor`] the icon keeps
/// its colors. In both cases `adjustment` scales the lightness (1.0 leaves
/// it unchanged).
///
/// # Consumed Properties
///
/// - [`FolderTint`](super::FolderTint): if absent, the region's average
///   color is sampled instead.
#[derive(Debug, Clone, Copy)]
pub struct ImprintLayer<'a> {
    pub icon: &'a RgbaImage,
    pub region: RectPx,
    pub style: ImprintStyle,
    pub adjustment: f32,
}

impl LayerEffect for ImprintLayer<'_> {
    fn transform(&self, ctx: &mut RenderContext) -> Result<()> {
        let size = self
            .region
            .fit(SizePx::new(self.icon.width(), self.icon.height()));
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let mut fitted = if (size.width, size.height) == self.icon.dimensions() {
            self.icon.clone()
        } else {
            imageops::resize(self.icon, size.width, size.height, FilterType::Lanczos3)
        };

        match self.style {
            ImprintStyle::Silhouette => {
                let tint = ctx.tint_or_sample(self.region);
                let (r, g, b) = adjust_lightness(darken_color(tint, IMPRINT_DARKEN), self.adjustment);
                for pixel in fitted.pixels_mut() {
                    pixel.0 = [r, g, b, pixel[3]];
                }
            }
            ImprintStyle::FullColor => {
                if !is_neutral(self.adjustment) {
                    for pixel in fitted.pixels_mut() {
                        if pixel[3] == 0 {
                            continue;
                        }
                        let (r, g, b) = adjust_lightness((pixel[0], pixel[1], pixel[2]), self.adjustment);
                        pixel.0 = [r, g, b, pixel[3]];
                    }
                }
            }
        }

        let (x, y) = self.region.centered(size);
        composite_over(&mut ctx.image, &fitted, x, y);
        Ok(())
    }
}

// ============================================================================
// Color Utilities
// ============================================================================

fn is_neutral(factor: f32) -> bool {
    (factor - 1.0).abs() < 1e-4
}

fn to_hsl((r, g, b): Rgb) -> Hsl {
    Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0).into_color()
}

fn from_hsl(hsl: Hsl) -> Rgb {
    let rgb: Srgb = hsl.into_color();
    (
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Darkens a color by reducing its HSL lightness.
pub fn darken_color(color: Rgb, amount: f32) -> Rgb {
    let mut hsl = to_hsl(color);
    hsl.lightness = (hsl.lightness - amount).max(0.0);
    from_hsl(hsl)
}

/// Scales a color's HSL lightness by `factor`, clamped to the valid range.
pub fn adjust_lightness(color: Rgb, factor: f32) -> Rgb {
    if is_neutral(factor) {
        return color;
    }
    let mut hsl = to_hsl(color);
    hsl.lightness = (hsl.lightness * factor).clamp(0.0, 1.0);
    from_hsl(hsl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::FolderTint;
    use image::Rgba;

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]))
    }

    fn brightness((r, g, b): Rgb) -> u32 {
        (r as u32 + g as u32 + b as u32) / 3
    }

    #[test]
    fn darken_color_works() {
        let original = (200, 100, 100);
        let darkened = darken_color(original, 0.2);
        assert!(brightness(darkened) < brightness(original));
    }

    #[test]
    fn adjust_lightness_scales() {
        let color = (100, 150, 200);
        assert_eq!(adjust_lightness(color, 1.0), color);
        assert_eq!(adjust_lightness(color, 0.0), (0, 0, 0));
        assert!(brightness(adjust_lightness(color, 1.5)) > brightness(color));
        assert_eq!(adjust_lightness(color, 2.0), (255, 255, 255));
    }

    #[test]
    fn silhouette_uses_darkened_tint() {
        let icon = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        let mut ctx = RenderContext::new(canvas());
        ctx.set(FolderTint((100, 150, 200)));

        let layer = ImprintLayer {
            icon: &icon,
            region: RectPx::new(24, 24, 16, 16),
            style: ImprintStyle::Silhouette,
            adjustment: 1.0,
        };
        layer.apply(&mut ctx).unwrap();

        let (r, g, b) = darken_color((100, 150, 200), IMPRINT_DARKEN);
        assert_eq!(ctx.image.get_pixel(30, 30).0, [r, g, b, 255]);
        assert_eq!(ctx.image.get_pixel(10, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn full_color_keeps_icon_colors() {
        let icon = RgbaImage::from_pixel(16, 16, Rgba([10, 200, 30, 255]));
        let mut ctx = RenderContext::new(canvas());

        let layer = ImprintLayer {
            icon: &icon,
            region: RectPx::new(8, 8, 16, 16),
            style: ImprintStyle::FullColor,
            adjustment: 1.0,
        };
        layer.apply(&mut ctx).unwrap();
        assert_eq!(ctx.image.get_pixel(16, 16).0, [10, 200, 30, 255]);

        let dimmed = ImprintLayer { adjustment: 0.0, ..layer };
        dimmed.apply(&mut ctx).unwrap();
        assert_eq!(ctx.image.get_pixel(16, 16).0, [0, 0, 0, 255]);
    }

    #[test]
    fn icon_is_fitted_and_centered() {
        // A wide icon fills the region horizontally only.
        let icon = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 255]));
        let mut ctx = RenderContext::new(canvas());

        let layer = ImprintLayer {
            icon: &icon,
            region: RectPx::new(0, 0, 32, 32),
            style: ImprintStyle::FullColor,
            adjustment: 1.0,
        };
        layer.apply(&mut ctx).unwrap();

        // Fitted to 32x16, centered vertically at y = 8..24.
        assert_eq!(ctx.image.get_pixel(16, 4).0, [255, 255, 255, 255]);
        assert_eq!(ctx.image.get_pixel(16, 16)[2], 255);
        assert_eq!(ctx.image.get_pixel(40, 16).0, [255, 255, 255, 255]);
    }

    #[test]
    fn transparent_icon_leaves_canvas() {
        let icon = RgbaImage::new(16, 16);
        let mut ctx = RenderContext::new(canvas());
        ctx.set(FolderTint((1, 2, 3)));

        let layer = ImprintLayer {
            icon: &icon,
            region: RectPx::new(0, 0, 16, 16),
            style: ImprintStyle::Silhouette,
            adjustment: 1.0,
        };
        layer.apply(&mut ctx).unwrap();
        assert_eq!(ctx.image, canvas());
    }
}
