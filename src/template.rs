//! Folder templates for each operating-system style.
//!
//! A template is a vector drawing of an empty folder, filled with the
//! palette of a [`ColorVariant`], plus the fixed canvas regions where the
//! user's icon and label go. Templates are rasterized by the folder layer.

use crate::canvas::CANVAS_SIZE;
use crate::config::OsStyle;
use crate::icon::RectPx;

/// An sRGB color without alpha.
pub type Rgb = (u8, u8, u8);

// ============================================================================
// ColorVariant
// ============================================================================

/// A named folder palette belonging to one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorVariant {
    /// Stable identifier, prefixed with the style (e.g. `mac-os-red`).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Back panel (and tab).
    pub back: Rgb,
    /// Top of the front panel gradient.
    pub front_top: Rgb,
    /// Bottom of the front panel gradient; the folder's tint.
    pub front_bottom: Rgb,
}

const fn variant(
    id: &'static str,
    name: &'static str,
    back: Rgb,
    front_top: Rgb,
    front_bottom: Rgb,
) -> ColorVariant {
    ColorVariant { id, name, back, front_top, front_bottom }
}

const MAC_OS_VARIANTS: &[ColorVariant] = &[
    variant("mac-os-default-dark", "Default (dark)", (0x1c, 0x86, 0xc8), (0x4a, 0xb0, 0xf0), (0x2e, 0x95, 0xdd)),
    variant("mac-os-default-light", "Default (light)", (0x6c, 0xb8, 0xea), (0xa3, 0xd8, 0xfb), (0x84, 0xc7, 0xf4)),
    variant("mac-os-red", "Red", (0xc8, 0x3a, 0x3a), (0xf2, 0x6b, 0x6b), (0xe0, 0x4f, 0x4f)),
    variant("mac-os-orange", "Orange", (0xd9, 0x7a, 0x1e), (0xff, 0xab, 0x4f), (0xf5, 0x94, 0x33)),
    variant("mac-os-yellow", "Yellow", (0xd6, 0xb0, 0x18), (0xff, 0xdc, 0x4f), (0xf5, 0xc8, 0x2e)),
    variant("mac-os-green", "Green", (0x3e, 0xa3, 0x4f), (0x72, 0xd3, 0x7f), (0x55, 0xbf, 0x63)),
    variant("mac-os-purple", "Purple", (0x8a, 0x4f, 0xc8), (0xb9, 0x85, 0xf2), (0xa0, 0x6a, 0xe0)),
    variant("mac-os-gray", "Gray", (0x7d, 0x82, 0x8a), (0xb4, 0xb9, 0xc0), (0x9a, 0x9f, 0xa7)),
];

const WINDOWS_11_VARIANTS: &[ColorVariant] = &[
    variant("windows-11-default", "Default", (0xe8, 0xa8, 0x2a), (0xff, 0xd7, 0x5e), (0xf9, 0xc2, 0x3c)),
    variant("windows-11-blue", "Blue", (0x1f, 0x6f, 0xc9), (0x5a, 0xaa, 0xf5), (0x3b, 0x8e, 0xe6)),
    variant("windows-11-green", "Green", (0x2f, 0x8f, 0x4a), (0x6c, 0xcf, 0x85), (0x4c, 0xb5, 0x68)),
    variant("windows-11-red", "Red", (0xb8, 0x32, 0x32), (0xf0, 0x70, 0x70), (0xdc, 0x50, 0x50)),
    variant("windows-11-purple", "Purple", (0x6e, 0x3d, 0xb0), (0xa8, 0x7f, 0xe8), (0x8c, 0x5d, 0xd4)),
    variant("windows-11-gray", "Gray", (0x6a, 0x6f, 0x76), (0xb0, 0xb5, 0xbb), (0x90, 0x95, 0x9c)),
];

/// All color variants of a style, default first.
pub fn variants(style: OsStyle) -> &'static [ColorVariant] {
    match style {
        OsStyle::MacOs => MAC_OS_VARIANTS,
        OsStyle::Windows11 => WINDOWS_11_VARIANTS,
    }
}

/// Looks up a variant by id within a style.
pub fn find_variant(style: OsStyle, id: &str) -> Option<&'static ColorVariant> {
    variants(style).iter().find(|v| v.id == id)
}

// ============================================================================
// FolderTemplate
// ============================================================================

/// How the user's icon is drawn onto the folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImprintStyle {
    /// The icon's alpha mask filled with a darkened folder tint.
    Silhouette,
    /// The icon in its own colors.
    FullColor,
}

/// Geometry and artwork of one style's folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderTemplate {
    pub style: OsStyle,
    /// Where the user's icon is fitted and centered.
    pub icon_region: RectPx,
    /// Strip below the icon reserved for the label.
    pub label_region: RectPx,
    pub imprint: ImprintStyle,
}

impl FolderTemplate {
    pub const MAC_OS: Self = Self {
        style: OsStyle::MacOs,
        icon_region: RectPx::new(352, 400, 320, 320),
        label_region: RectPx::new(152, 740, 720, 96),
        imprint: ImprintStyle::Silhouette,
    };

    pub const WINDOWS_11: Self = Self {
        style: OsStyle::Windows11,
        icon_region: RectPx::new(354, 392, 320, 320),
        label_region: RectPx::new(136, 724, 756, 88),
        imprint: ImprintStyle::FullColor,
    };

    pub fn for_style(style: OsStyle) -> Self {
        match style {
            OsStyle::MacOs => Self::MAC_OS,
            OsStyle::Windows11 => Self::WINDOWS_11,
        }
    }

    /// SVG document of the empty folder at canvas size.
    pub fn svg(&self, variant: &ColorVariant) -> String {
        let back = hex(variant.back);
        let top = hex(variant.front_top);
        let bottom = hex(variant.front_bottom);

        let body = match self.style {
            OsStyle::MacOs => format!(
                r##"<path d="M112 232 a48 48 0 0 1 48 -48 h228 a48 48 0 0 1 38 19 l34 45 h404 a48 48 0 0 1 48 48 v520 h-800 z" fill="{back}"/>
  <rect x="112" y="308" width="800" height="560" rx="48" fill="url(#front)"/>
  <rect x="112" y="308" width="800" height="6" fill="#ffffff" fill-opacity="0.35"/>"##
            ),
            OsStyle::Windows11 => format!(
                r#"<path d="M96 248 a40 40 0 0 1 40 -40 h232 a40 40 0 0 1 28 12 l44 44 h452 a40 40 0 0 1 40 40 v488 a40 40 0 0 1 -40 40 h-756 a40 40 0 0 1 -40 -40 z" fill="{back}"/>
  <path d="M96 372 a40 40 0 0 1 40 -40 h756 a40 40 0 0 1 40 40 v420 a40 40 0 0 1 -40 40 h-756 a40 40 0 0 1 -40 -40 z" fill="url(#front)"/>"#
            ),
        };

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">
  <defs>
    <linearGradient id="front" x1="0" y1="0" x2="0" y2="1">
      <stop offset="0" stop-color="{top}"/>
      <stop offset="1" stop-color="{bottom}"/>
    </linearGradient>
  </defs>
  {body}
</svg>"#,
            size = CANVAS_SIZE,
        )
    }
}

/// Formats a color as `#rrggbb`.
pub fn hex((r, g, b): Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
