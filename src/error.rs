//! Error types for rendering and exporting folder icons.

use thiserror::Error;

use crate::config::OsStyle;

/// Errors produced by the renderer, the exporters and the editor.
///
/// Decode failures of the user icon are not represented here: they degrade
/// the render to a blank icon region instead of failing it.
#[derive(Debug, Error)]
pub enum Error {
    /// The color variant does not exist for the given style.
    #[error("unknown color variant `{variant}` for {style}")]
    UnknownColorVariant { style: OsStyle, variant: String },

    /// A built-in template could not be rasterized.
    #[error("failed to rasterize {0} folder template")]
    Template(OsStyle),

    /// An icon was requested without any resolution.
    #[error("an ICO needs at least one resolution")]
    NoIcoResolutions,

    /// Encoding the canvas (PNG or ICO payload) failed.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Writing the downloaded file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Moving a finished download into place failed.
    #[error("failed to persist download: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// Configuration JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
