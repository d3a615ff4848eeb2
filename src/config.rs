//! Editor configuration: every user-chosen option describing one icon.
//!
//! A [`Configuration`] serializes to camelCase JSON so a front end (or the
//! command-line tool) can hand a whole set of options over at once:
//!
//! ```json
//! {
//!   "os": "windows-11",
//!   "color": "windows-11-default",
//!   "adjustColor": 1.0,
//!   "text": "Projects",
//!   "filename": "my-icon"
//! }
//! ```
//!
//! The icon bytes are never serialized.
//!
//! # Example
//!
//! ```
//! use folder_art::{ConfigUpdate, Configuration, OsStyle};
//!
//! let mut config = Configuration::default();
//! config.apply(ConfigUpdate::ColorVariant("mac-os-green".into())).unwrap();
//!
//! // Switching style always resets the color variant.
//! config.apply(ConfigUpdate::OsStyle(OsStyle::Windows11)).unwrap();
//! assert_eq!(config.color_variant(), "windows-11-default");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::icon::IconFile;
use crate::template::{self, ColorVariant};

/// Lowest accepted color adjustment.
pub const MIN_COLOR_ADJUSTMENT: f32 = 0.0;

/// Highest accepted color adjustment.
pub const MAX_COLOR_ADJUSTMENT: f32 = 2.0;

/// Download name used when the configured filename is empty.
pub const DEFAULT_FILENAME: &str = "icon";

const MAX_FILENAME_CHARS: usize = 200;
const RESERVED_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

// ============================================================================
// OsStyle
// ============================================================================

/// The operating-system look of the folder template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OsStyle {
    /// macOS folder, exported as PNG.
    #[default]
    #[serde(rename = "mac-os")]
    #[cfg_attr(feature = "clap", value(name = "mac-os"))]
    MacOs,

    /// Windows 11 folder, exported as ICO.
    #[serde(rename = "windows-11")]
    #[cfg_attr(feature = "clap", value(name = "windows-11"))]
    Windows11,
}

impl OsStyle {
    /// Identifier used in JSON and variant ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MacOs => "mac-os",
            Self::Windows11 => "windows-11",
        }
    }

    /// The color variant selected whenever this style is chosen.
    pub fn default_variant(&self) -> &'static str {
        match self {
            Self::MacOs => "mac-os-default-dark",
            Self::Windows11 => "windows-11-default",
        }
    }

    /// All color variants available for this style.
    pub fn variants(&self) -> &'static [ColorVariant] {
        template::variants(*self)
    }
}

impl fmt::Display for OsStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => f.write_str("macOS"),
            Self::Windows11 => f.write_str("Windows 11"),
        }
    }
}

// ============================================================================
// ConfigUpdate
// ============================================================================

/// A single field edit coming from the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigUpdate {
    /// Switch style; cascades a reset of the color variant.
    OsStyle(OsStyle),
    /// Select a color variant of the current style.
    ColorVariant(String),
    /// Brightness factor for the imprinted icon.
    ColorAdjustment(f32),
    /// Replace (or clear) the icon image.
    IconImage(Option<IconFile>),
    /// Text drawn on the folder.
    LabelText(String),
    /// Download name without extension.
    OutputFilename(String),
}

impl ConfigUpdate {
    /// Name of the edited field, for logging.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::OsStyle(_) => "os",
            Self::ColorVariant(_) => "color",
            Self::ColorAdjustment(_) => "adjustColor",
            Self::IconImage(_) => "icon",
            Self::LabelText(_) => "text",
            Self::OutputFilename(_) => "filename",
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// The full set of options describing the icon to render.
///
/// Fields are only mutated through [`Configuration::apply`], which keeps the
/// color variant valid for the selected style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Configuration {
    #[serde(rename = "os", default)]
    os_style: OsStyle,

    /// Empty after deserialization means "the style's default".
    #[serde(rename = "color", default)]
    color_variant: String,

    #[serde(rename = "adjustColor", default = "default_color_adjustment")]
    color_adjustment: f32,

    #[serde(skip)]
    icon: Option<IconFile>,

    #[serde(rename = "text", default)]
    label_text: String,

    #[serde(rename = "filename", default)]
    output_filename: String,
}

fn default_color_adjustment() -> f32 {
    1.0
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            os_style: OsStyle::MacOs,
            color_variant: OsStyle::MacOs.default_variant().to_string(),
            color_adjustment: default_color_adjustment(),
            icon: None,
            label_text: String::new(),
            output_filename: String::new(),
        }
    }
}

impl Configuration {
    /// Creates the configuration an editor starts with.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn os_style(&self) -> OsStyle {
        self.os_style
    }

    pub fn color_variant(&self) -> &str {
        &self.color_variant
    }

    /// Resolves the selected color variant to its palette.
    pub fn variant(&self) -> Result<&'static ColorVariant> {
        template::find_variant(self.os_style, &self.color_variant).ok_or_else(|| {
            Error::UnknownColorVariant {
                style: self.os_style,
                variant: self.color_variant.clone(),
            }
        })
    }

    pub fn color_adjustment(&self) -> f32 {
        self.color_adjustment
    }

    pub fn icon(&self) -> Option<&IconFile> {
        self.icon.as_ref()
    }

    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    pub fn output_filename(&self) -> &str {
        &self.output_filename
    }

    /// Applies one field edit.
    ///
    /// A color variant that does not belong to the current style is rejected
    /// and leaves the configuration untouched.
    pub fn apply(&mut self, update: ConfigUpdate) -> Result<()> {
        match update {
            ConfigUpdate::OsStyle(style) => {
                self.os_style = style;
                self.color_variant = style.default_variant().to_string();
            }
            ConfigUpdate::ColorVariant(id) => {
                if template::find_variant(self.os_style, &id).is_none() {
                    return Err(Error::UnknownColorVariant {
                        style: self.os_style,
                        variant: id,
                    });
                }
                self.color_variant = id;
            }
            ConfigUpdate::ColorAdjustment(value) => {
                self.color_adjustment = clamp_color_adjustment(value);
            }
            ConfigUpdate::IconImage(icon) => self.icon = icon,
            ConfigUpdate::LabelText(text) => self.label_text = text,
            ConfigUpdate::OutputFilename(name) => self.output_filename = name,
        }
        Ok(())
    }

    /// Builder-style [`apply`](Self::apply).
    pub fn with(mut self, update: ConfigUpdate) -> Result<Self> {
        self.apply(update)?;
        Ok(self)
    }

    /// Normalizes a configuration that did not come through [`apply`](Self::apply).
    ///
    /// Fills an empty color variant with the style default, clamps the color
    /// adjustment and rejects a variant from the wrong style.
    pub fn validated(mut self) -> Result<Self> {
        if self.color_variant.trim().is_empty() {
            self.color_variant = self.os_style.default_variant().to_string();
        }
        self.variant()?;
        self.color_adjustment = clamp_color_adjustment(self.color_adjustment);
        Ok(self)
    }

    /// File name stem used for downloads: the sanitized output filename, or
    /// [`DEFAULT_FILENAME`] when nothing usable is left.
    pub fn download_stem(&self) -> String {
        let stem = sanitize_filename(&self.output_filename);
        if stem.is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            stem
        }
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the configuration to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// JSON Schema describing the serialized form.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Configuration);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

/// Clamps a color adjustment into the accepted range; non-finite input
/// falls back to the neutral `1.0`.
pub fn clamp_color_adjustment(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(MIN_COLOR_ADJUSTMENT, MAX_COLOR_ADJUSTMENT)
    } else {
        default_color_adjustment()
    }
}

/// Makes a user-typed name safe to use as a download file name.
///
/// Path separators, characters reserved on Windows and control characters
/// become `_`. Surrounding whitespace, leading dots and trailing dots are
/// removed so the name can neither escape the target directory nor hide.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    cleaned
        .trim()
        .trim_start_matches('.')
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect()
}
