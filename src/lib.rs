//! folder-art: custom folder icons for macOS and Windows 11
//!
//! This crate composites a user-supplied image onto an OS-styled folder
//! template, renders a fixed-size preview canvas and exports it as a PNG
//! (macOS) or a multi-resolution ICO (Windows 11).
//!
//! # Example
//!
//! ```
//! use folder_art::{ConfigUpdate, Editor, MemoryTarget, OsStyle};
//!
//! let mut editor = Editor::new().unwrap();
//!
//! // Switching style resets the color variant to the style's default.
//! editor.set_os_style(OsStyle::Windows11).unwrap();
//! assert_eq!(editor.configuration().color_variant(), "windows-11-default");
//!
//! editor.update(ConfigUpdate::LabelText("Projects".into())).unwrap();
//! editor.update(ConfigUpdate::OutputFilename("projects".into())).unwrap();
//!
//! let mut downloads = MemoryTarget::new();
//! editor.download(&mut downloads).unwrap();
//! assert_eq!(downloads.last().unwrap().filename, "projects.ico");
//! ```
//!
//! # Rendering without an editor
//!
//! The renderer and exporters are plain functions over a [`Configuration`]
//! and a [`Canvas`]:
//!
//! ```
//! use folder_art::{export_png, render, Configuration};
//!
//! let canvas = render(&Configuration::default()).unwrap();
//! let png = export_png(&canvas, "icon").unwrap();
//! assert_eq!(png.filename, "icon.png");
//! ```

mod busy;
mod canvas;
mod config;
mod editor;
mod error;
mod icon;
mod layer;
mod render;
mod template;

pub mod export;

pub use busy::{BusyFlag, BusyGuard};
pub use canvas::{Canvas, CANVAS_SIZE};
pub use config::{
    clamp_color_adjustment, sanitize_filename, ConfigUpdate, Configuration, OsStyle,
    DEFAULT_FILENAME, MAX_COLOR_ADJUSTMENT, MIN_COLOR_ADJUSTMENT,
};
pub use editor::{Configurable, Editor};
pub use error::{Error, Result};
pub use export::{
    export_ico, export_png, DirectoryTarget, DownloadTarget, ExportFormat, ExportedFile,
    MemoryTarget,
};
pub use icon::{mime_type_for_path, IconFile, RectPx, SizePx};
pub use layer::{FolderTint, LayerEffect, RenderContext};
pub use render::{decode_icon, render, render_canvas};
pub use template::{find_variant, variants, ColorVariant, FolderTemplate, ImprintStyle, Rgb};
