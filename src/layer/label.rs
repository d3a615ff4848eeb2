//! Label layer: optional text drawn under the icon.

use super::imprint::darken_color;
use super::svg::{composite_over, escape_xml, render_svg};
use super::{LayerEffect, RenderContext};
use crate::error::Result;
use crate::icon::RectPx;
use crate::template::hex;

/// How much darker than the folder tint the text is drawn.
const LABEL_DARKEN: f32 = 0.3;

/// Average glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.6;

/// Draws `text` centered in `region` using a system sans-serif font.
///
/// The font size shrinks so long labels still fit the region width. If no
/// font is available nothing is drawn.
///
/// # Consumed Properties
///
/// - [`FolderTint`](super::FolderTint): if absent, the region's average
///   color is sampled instead.
#[derive(Debug, Clone, Copy)]
pub struct LabelLayer<'a> {
    pub text: &'a str,
    pub region: RectPx,
}

impl LabelLayer<'_> {
    /// Font size in pixels for the current text.
    pub fn font_size(&self) -> f32 {
        let chars = self.text.trim().chars().count().max(1) as f32;
        let by_height = self.region.height as f32 * 0.75;
        let by_width = self.region.width as f32 / (chars * GLYPH_ASPECT);
        by_height.min(by_width).max(1.0)
    }

    fn svg(&self, color: &str) -> String {
        let width = self.region.width;
        let height = self.region.height;
        let font_size = self.font_size();
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><text x="{x}" y="{y}" font-family="sans-serif" font-weight="600" font-size="{font_size:.1}" text-anchor="middle" dominant-baseline="central" fill="{color}">{text}</text></svg>"#,
            x = width as f32 / 2.0,
            y = height as f32 / 2.0,
            text = escape_xml(self.text.trim()),
        )
    }
}

impl LayerEffect for LabelLayer<'_> {
    fn transform(&self, ctx: &mut RenderContext) -> Result<()> {
        if self.text.trim().is_empty() || self.region.width == 0 || self.region.height == 0 {
            return Ok(());
        }

        let color = hex(darken_color(ctx.tint_or_sample(self.region), LABEL_DARKEN));
        let label = render_svg(&self.svg(&color), self.region.width.max(self.region.height))
            .filter(|label| label.pixels().any(|p| p[3] > 0));
        let Some(label) = label else {
            tracing::warn!(text = self.text, "label could not be rendered");
            return Ok(());
        };

        composite_over(&mut ctx.image, &label, self.region.x as i32, self.region.y as i32);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::svg::has_fonts;
    use image::{Rgba, RgbaImage};

    fn region() -> RectPx {
        RectPx::new(8, 40, 240, 48)
    }

    #[test]
    fn empty_label_draws_nothing() {
        let base = RgbaImage::from_pixel(256, 128, Rgba([50, 60, 70, 255]));
        let mut ctx = RenderContext::new(base.clone());

        LabelLayer { text: "   ", region: region() }.apply(&mut ctx).unwrap();
        assert_eq!(ctx.image, base);
    }

    #[test]
    fn label_stays_inside_region() {
        let base = RgbaImage::from_pixel(256, 128, Rgba([50, 60, 70, 255]));
        let mut ctx = RenderContext::new(base.clone());

        LabelLayer { text: "Projects & <Stuff>", region: region() }
            .apply(&mut ctx)
            .unwrap();

        for (x, y, pixel) in ctx.image.enumerate_pixels() {
            if !region().contains(x, y) {
                assert_eq!(pixel, base.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn label_draws_text() {
        if !has_fonts() {
            return;
        }
        let base = RgbaImage::from_pixel(256, 128, Rgba([200, 200, 200, 255]));
        let mut ctx = RenderContext::new(base.clone());

        LabelLayer { text: "Projects", region: region() }
            .apply(&mut ctx)
            .unwrap();
        assert_ne!(ctx.image, base);
    }

    #[test]
    fn font_size_shrinks_for_long_text() {
        let short = LabelLayer { text: "Hi", region: region() };
        let long = LabelLayer { text: "A much longer folder label", region: region() };
        assert_eq!(short.font_size(), 36.0);
        assert!(long.font_size() < short.font_size());
        assert!(long.font_size() * 26.0 * GLYPH_ASPECT <= 240.0 + 0.01);
    }

    #[test]
    fn svg_escapes_text() {
        let layer = LabelLayer { text: "a<b", region: region() };
        let svg = layer.svg("#000000");
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains("font-size=\"36.0\""));
    }
}
