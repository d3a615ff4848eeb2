//! Canvas renderer: turns a [`Configuration`] into a [`Canvas`].
//!
//! Rendering never fails because of the user's icon. An icon that cannot be
//! decoded leaves the icon region blank and the rest of the folder is drawn
//! as usual.

use image::RgbaImage;

use crate::canvas::{Canvas, CANVAS_SIZE};
use crate::config::Configuration;
use crate::error::Result;
use crate::icon::IconFile;
use crate::layer::svg::render_svg;
use crate::layer::{FolderLayer, ImprintLayer, LabelLayer, LayerEffect, RenderContext};
use crate::template::FolderTemplate;

/// Decodes an icon file into RGBA pixels.
///
/// SVG documents are rasterized at `svg_size`; everything else goes through
/// the `image` decoders. Returns `None` (and logs) on failure.
pub fn decode_icon(file: &IconFile, svg_size: u32) -> Option<RgbaImage> {
    let decoded = if file.is_svg() {
        std::str::from_utf8(&file.bytes)
            .ok()
            .and_then(|svg| render_svg(svg, svg_size))
    } else {
        match image::load_from_memory(&file.bytes) {
            Ok(img) => Some(img.to_rgba8()),
            Err(err) => {
                tracing::warn!(mime = %file.mime_type, error = %err, "icon decode failed");
                None
            }
        }
    };

    if decoded.is_none() {
        tracing::warn!(
            name = file.name.as_deref().unwrap_or("<unnamed>"),
            "icon region left blank"
        );
    }
    decoded
}

/// Renders the folder with an already decoded icon.
pub fn render_canvas(config: &Configuration, icon: Option<&RgbaImage>) -> Result<Canvas> {
    let template = FolderTemplate::for_style(config.os_style());
    let variant = config.variant()?;

    let mut ctx = RenderContext::new(RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE));

    FolderLayer::new(template, variant).apply(&mut ctx)?;

    if let Some(icon) = icon {
        ImprintLayer {
            icon,
            region: template.icon_region,
            style: template.imprint,
            adjustment: config.color_adjustment(),
        }
        .apply(&mut ctx)?;
    }

    LabelLayer {
        text: config.label_text(),
        region: template.label_region,
    }
    .apply(&mut ctx)?;

    tracing::debug!(
        style = %config.os_style(),
        variant = variant.id,
        has_icon = icon.is_some(),
        "rendered canvas"
    );

    Ok(Canvas::new(ctx.image))
}

/// Decodes the configured icon (if any) and renders the folder.
pub fn render(config: &Configuration) -> Result<Canvas> {
    let region = FolderTemplate::for_style(config.os_style()).icon_region;
    let icon = config
        .icon()
        .and_then(|file| decode_icon(file, region.width.max(region.height)));
    render_canvas(config, icon.as_ref())
}
