//! Folder template layer.

use super::svg::{composite_over, render_svg};
use super::{FolderTint, LayerEffect, RenderContext};
use crate::canvas::CANVAS_SIZE;
use crate::error::{Error, Result};
use crate::template::{ColorVariant, FolderTemplate};

/// Draws the empty folder of a style in one of its color variants.
///
/// # Emitted Properties
///
/// - [`FolderTint`]: the bottom color of the front panel.
#[derive(Debug, Clone, Copy)]
pub struct FolderLayer<'a> {
    pub template: FolderTemplate,
    pub variant: &'a ColorVariant,
}

impl<'a> FolderLayer<'a> {
    pub fn new(template: FolderTemplate, variant: &'a ColorVariant) -> Self {
        Self { template, variant }
    }
}

impl LayerEffect for FolderLayer<'_> {
    fn transform(&self, ctx: &mut RenderContext) -> Result<()> {
        let svg = self.template.svg(self.variant);
        let folder = render_svg(&svg, CANVAS_SIZE).ok_or(Error::Template(self.template.style))?;
        composite_over(&mut ctx.image, &folder, 0, 0);
        Ok(())
    }

    fn emit(&self, ctx: &mut RenderContext) {
        ctx.set(FolderTint(self.variant.front_bottom));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OsStyle;
    use crate::template::find_variant;
    use image::RgbaImage;

    #[test]
    fn draws_folder_and_emits_tint() {
        for style in [OsStyle::MacOs, OsStyle::Windows11] {
            let template = FolderTemplate::for_style(style);
            let variant = find_variant(style, style.default_variant()).unwrap();
            let mut ctx = RenderContext::new(RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE));

            FolderLayer::new(template, variant).apply(&mut ctx).unwrap();

            // Corners stay transparent, the icon region is opaque folder body.
            assert_eq!(ctx.image.get_pixel(0, 0)[3], 0);
            let region = template.icon_region;
            let center = ctx.image.get_pixel(region.x + region.width / 2, region.y + region.height / 2);
            assert_eq!(center[3], 255);
            assert_eq!(ctx.get::<FolderTint>(), Some(&FolderTint(variant.front_bottom)));
        }
    }
}
