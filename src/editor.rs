//! Editor controller: owns the configuration and the rendered canvas.

use crate::busy::{BusyFlag, BusyGuard};
use crate::canvas::Canvas;
use crate::config::{ConfigUpdate, Configuration, OsStyle};
use crate::error::Result;
use crate::export::{export_ico, export_png, DownloadTarget, ExportFormat};
use crate::icon::IconFile;
use crate::render::render;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a whole [`Configuration`].
pub trait Configurable {
    /// Replaces the current settings with `config` (validated first).
    fn apply_configuration(&mut self, config: Configuration) -> Result<()>;

    /// Exports the current settings.
    fn export_configuration(&self) -> Configuration;
}

// ============================================================================
// Editor
// ============================================================================

/// Main folder icon editor.
///
/// Every transition builds a new configuration, renders a fresh canvas for
/// it and only then commits both, so the canvas always matches the
/// configuration.
///
/// Dropped or pasted images are loaded in two steps: the drop stages the
/// file and raises the loading flag, [`finish_loading`](Self::finish_loading)
/// decodes it, re-renders and clears the flag.
///
/// # Example
///
/// ```
/// use folder_art::{ConfigUpdate, Editor, IconFile, MemoryTarget, OsStyle};
///
/// let mut editor = Editor::new().unwrap();
/// editor.set_os_style(OsStyle::Windows11).unwrap();
/// editor.update(ConfigUpdate::OutputFilename("my-icon".into())).unwrap();
///
/// // Non-image drops are ignored.
/// let accepted = editor.drop_files(&[IconFile::new("text/plain", b"hi".to_vec())]).unwrap();
/// assert!(!accepted);
///
/// let mut downloads = MemoryTarget::new();
/// editor.download(&mut downloads).unwrap();
/// assert_eq!(downloads.last().unwrap().filename, "my-icon.ico");
/// ```
pub struct Editor {
    config: Configuration,
    canvas: Canvas,
    pending: Option<PendingIcon>,
    loading: BusyFlag,
    downloading: BusyFlag,
}

/// An accepted icon waiting to be decoded.
struct PendingIcon {
    file: IconFile,
    _loading: BusyGuard,
}

impl Editor {
    /// Creates an editor with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_configuration(Configuration::default())
    }

    /// Creates an editor starting from `config`.
    pub fn with_configuration(config: Configuration) -> Result<Self> {
        let config = config.validated()?;
        let canvas = render(&config)?;
        Ok(Self {
            config,
            canvas,
            pending: None,
            loading: BusyFlag::new(),
            downloading: BusyFlag::new(),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// The canvas rendered for the current configuration.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// True from an accepted drop or paste until the icon is decoded.
    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    /// True while an ICO download is being produced.
    pub fn is_downloading(&self) -> bool {
        self.downloading.is_set()
    }

    /// A handle observing the loading state.
    pub fn loading_flag(&self) -> BusyFlag {
        self.loading.clone()
    }

    /// A handle observing the downloading state.
    pub fn downloading_flag(&self) -> BusyFlag {
        self.downloading.clone()
    }

    /// Applies one field edit and re-renders.
    ///
    /// On error the configuration and canvas are left unchanged.
    pub fn update(&mut self, update: ConfigUpdate) -> Result<()> {
        tracing::debug!(field = update.field_name(), "configuration update");
        let config = self.config.clone().with(update)?;
        self.commit(config)
    }

    /// Switches the operating-system style, resetting the color variant.
    pub fn set_os_style(&mut self, style: OsStyle) -> Result<()> {
        self.update(ConfigUpdate::OsStyle(style))
    }

    /// Handles a drag-and-drop of files. Only the first file is considered.
    ///
    /// Returns whether the file was accepted as the icon. An accepted file
    /// is applied by [`finish_loading`](Self::finish_loading).
    pub fn drop_files(&mut self, files: &[IconFile]) -> Result<bool> {
        match files.first() {
            Some(file) => self.process_image_file(file),
            None => Ok(false),
        }
    }

    /// Handles a clipboard paste. Pastes without a file are ignored.
    ///
    /// Returns whether the file was accepted as the icon.
    pub fn paste_files(&mut self, files: &[IconFile]) -> Result<bool> {
        match files.first() {
            Some(file) => self.process_image_file(file),
            None => Ok(false),
        }
    }

    /// The shared "set icon" transition behind drops and pastes.
    fn process_image_file(&mut self, file: &IconFile) -> Result<bool> {
        if !file.is_image() {
            tracing::debug!(mime = %file.mime_type, "ignoring non-image file");
            return Ok(false);
        }
        tracing::debug!(mime = %file.mime_type, bytes = file.bytes.len(), "loading icon");
        match &mut self.pending {
            Some(pending) => pending.file = file.clone(),
            None => {
                self.pending = Some(PendingIcon {
                    file: file.clone(),
                    _loading: self.loading.acquire(),
                })
            }
        }
        Ok(true)
    }

    /// The icon staged by the last drop or paste, if not yet applied.
    pub fn pending_icon(&self) -> Option<&IconFile> {
        self.pending.as_ref().map(|pending| &pending.file)
    }

    /// Decodes the staged icon, re-renders and clears the loading flag.
    ///
    /// Returns whether an icon was applied. The flag is cleared even when
    /// rendering fails; the configuration is then left unchanged.
    pub fn finish_loading(&mut self) -> Result<bool> {
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };
        self.update(ConfigUpdate::IconImage(Some(pending.file)))?;
        Ok(true)
    }

    /// Format the download action will produce.
    pub fn download_format(&self) -> ExportFormat {
        ExportFormat::for_style(self.config.os_style())
    }

    /// Full name of the file a download will produce (`icon.png`, ...).
    pub fn download_filename(&self) -> String {
        format!(
            "{}.{}",
            self.config.download_stem(),
            self.download_format().extension()
        )
    }

    /// Exports the canvas in the style's format and hands it to `target`.
    ///
    /// The downloading flag is raised for ICO exports and cleared on every
    /// exit path.
    pub fn download(&self, target: &mut dyn DownloadTarget) -> Result<()> {
        let stem = self.config.download_stem();
        match self.download_format() {
            ExportFormat::Png => target.download(export_png(&self.canvas, &stem)?),
            ExportFormat::Ico => {
                let _busy = self.downloading.acquire();
                target.download(export_ico(&self.canvas, &stem)?)
            }
        }
    }

    fn commit(&mut self, config: Configuration) -> Result<()> {
        let canvas = render(&config)?;
        self.config = config;
        self.canvas = canvas;
        Ok(())
    }
}

impl Configurable for Editor {
    /// Replaces the editor's configuration, keeping the current icon when
    /// `config` carries none (icons are never part of serialized settings).
    fn apply_configuration(&mut self, config: Configuration) -> Result<()> {
        let mut config = config.validated()?;
        if config.icon().is_none() {
            if let Some(icon) = self.config.icon() {
                config.apply(ConfigUpdate::IconImage(Some(icon.clone())))?;
            }
        }
        self.commit(config)
    }

    fn export_configuration(&self) -> Configuration {
        self.config.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CANVAS_SIZE;
    use crate::error::Error;
    use crate::export::{ExportedFile, MemoryTarget};
    use crate::icon::SizePx;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_file() -> IconFile {
        let img = RgbaImage::from_pixel(24, 24, Rgba([0, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        IconFile::new("image/png", bytes).with_name("logo.png")
    }

    /// Fails every download, recording whether the editor looked busy.
    struct FailingTarget {
        downloading: BusyFlag,
        saw_busy: bool,
    }

    impl DownloadTarget for FailingTarget {
        fn download(&mut self, _file: ExportedFile) -> Result<()> {
            self.saw_busy = self.downloading.is_set();
            Err(Error::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn editor_starts_with_defaults() {
        let editor = Editor::new().unwrap();
        assert_eq!(editor.configuration(), &Configuration::default());
        assert_eq!(editor.canvas().dimensions(), SizePx::new(CANVAS_SIZE, CANVAS_SIZE));
        assert!(!editor.is_loading());
        assert!(!editor.is_downloading());
        assert_eq!(editor.download_filename(), "icon.png");
    }

    #[test]
    fn style_switch_cascades_variant_reset() {
        let mut editor = Editor::new().unwrap();
        editor
            .update(ConfigUpdate::ColorVariant("mac-os-purple".into()))
            .unwrap();

        editor.set_os_style(OsStyle::Windows11).unwrap();
        assert_eq!(editor.configuration().color_variant(), "windows-11-default");

        editor.set_os_style(OsStyle::MacOs).unwrap();
        assert_eq!(editor.configuration().color_variant(), "mac-os-default-dark");
    }

    #[test]
    fn canvas_is_recreated_on_change() {
        let mut editor = Editor::new().unwrap();
        let before = editor.canvas().clone();

        editor
            .update(ConfigUpdate::ColorVariant("mac-os-red".into()))
            .unwrap();
        assert_ne!(editor.canvas(), &before);
    }

    #[test]
    fn rejected_update_keeps_state() {
        let mut editor = Editor::new().unwrap();
        let before = editor.canvas().clone();

        let result = editor.update(ConfigUpdate::ColorVariant("windows-11-blue".into()));
        assert!(result.is_err());
        assert_eq!(editor.configuration(), &Configuration::default());
        assert_eq!(editor.canvas(), &before);
    }

    #[test]
    fn dropping_image_sets_icon() {
        let mut editor = Editor::new().unwrap();
        let observer = editor.loading_flag();
        let before = editor.canvas().clone();
        let file = png_file();

        assert!(editor.drop_files(&[file.clone()]).unwrap());
        assert!(editor.is_loading());
        assert!(observer.is_set());
        assert_eq!(editor.pending_icon(), Some(&file));
        assert!(editor.configuration().icon().is_none());

        assert!(editor.finish_loading().unwrap());
        assert!(!editor.is_loading());
        assert!(!observer.is_set());
        assert!(editor.pending_icon().is_none());
        assert_eq!(editor.configuration().icon(), Some(&file));
        assert_ne!(editor.canvas(), &before);
    }

    #[test]
    fn pasting_image_sets_icon() {
        let mut editor = Editor::new().unwrap();
        let file = png_file();

        assert!(editor.paste_files(&[file.clone()]).unwrap());
        assert!(editor.is_loading());
        assert!(editor.finish_loading().unwrap());
        assert_eq!(editor.configuration().icon(), Some(&file));
    }

    #[test]
    fn second_drop_replaces_staged_icon() {
        let mut editor = Editor::new().unwrap();
        let first = png_file();
        let second = png_file().with_name("other.png");

        editor.drop_files(&[first]).unwrap();
        editor.paste_files(&[second.clone()]).unwrap();
        assert!(editor.is_loading());

        editor.finish_loading().unwrap();
        assert_eq!(editor.configuration().icon(), Some(&second));
        assert!(!editor.is_loading());
        assert!(!editor.finish_loading().unwrap());
    }

    #[test]
    fn undecodable_image_still_finishes_loading() {
        let mut editor = Editor::new().unwrap();
        let before = editor.canvas().clone();
        let broken = IconFile::new("image/png", b"not a png".to_vec());

        assert!(editor.drop_files(&[broken.clone()]).unwrap());
        assert!(editor.finish_loading().unwrap());
        assert!(!editor.is_loading());
        assert_eq!(editor.configuration().icon(), Some(&broken));
        assert_eq!(editor.canvas(), &before);
    }

    #[test]
    fn non_image_drop_and_paste_are_ignored() {
        let mut editor = Editor::new().unwrap();
        let icon = png_file();
        editor.drop_files(&[icon.clone()]).unwrap();
        editor.finish_loading().unwrap();
        let canvas = editor.canvas().clone();

        let text = IconFile::new("text/plain", b"hello".to_vec());
        assert!(!editor.drop_files(&[text.clone()]).unwrap());
        assert!(!editor.paste_files(&[text]).unwrap());
        assert!(!editor.paste_files(&[]).unwrap());
        assert!(!editor.drop_files(&[]).unwrap());
        assert!(!editor.is_loading());

        assert_eq!(editor.configuration().icon(), Some(&icon));
        assert_eq!(editor.canvas(), &canvas);
    }

    #[test]
    fn drop_uses_first_file() {
        let mut editor = Editor::new().unwrap();
        let text = IconFile::new("text/plain", b"hello".to_vec());

        assert!(!editor.drop_files(&[text, png_file()]).unwrap());
        assert!(!editor.is_loading());
        assert!(editor.pending_icon().is_none());
    }

    #[test]
    fn mac_os_downloads_png() {
        let mut editor = Editor::new().unwrap();
        editor
            .update(ConfigUpdate::OutputFilename("folder".into()))
            .unwrap();

        let mut target = MemoryTarget::new();
        editor.download(&mut target).unwrap();

        let file = target.last().unwrap();
        assert_eq!(file.filename, "folder.png");
        assert_eq!(file.format, ExportFormat::Png);
        let decoded = image::load_from_memory(&file.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (CANVAS_SIZE, CANVAS_SIZE));
    }

    #[test]
    fn windows_downloads_ico() {
        let mut editor = Editor::new().unwrap();
        editor.set_os_style(OsStyle::Windows11).unwrap();
        editor
            .update(ConfigUpdate::OutputFilename("my-icon".into()))
            .unwrap();
        assert_eq!(editor.download_filename(), "my-icon.ico");

        let mut target = MemoryTarget::new();
        editor.download(&mut target).unwrap();
        assert!(!editor.is_downloading());

        let file = target.last().unwrap();
        assert_eq!(file.filename, "my-icon.ico");
        assert_eq!(&file.bytes[..4], &[0, 0, 1, 0]);
        assert!(u16::from_le_bytes([file.bytes[4], file.bytes[5]]) >= 1);
    }

    #[test]
    fn failed_download_clears_downloading_flag() {
        let mut editor = Editor::new().unwrap();
        editor.set_os_style(OsStyle::Windows11).unwrap();

        let mut target = FailingTarget {
            downloading: editor.downloading_flag(),
            saw_busy: false,
        };
        assert!(editor.download(&mut target).is_err());
        assert!(target.saw_busy);
        assert!(!editor.is_downloading());
    }

    #[test]
    fn download_name_is_sanitized() {
        let mut editor = Editor::new().unwrap();
        editor
            .update(ConfigUpdate::OutputFilename("../../evil".into()))
            .unwrap();
        assert_eq!(editor.download_filename(), "_.._evil.png");
    }

    #[test]
    fn apply_configuration_keeps_icon() {
        let mut editor = Editor::new().unwrap();
        let icon = png_file();
        editor.drop_files(&[icon.clone()]).unwrap();
        editor.finish_loading().unwrap();

        let incoming = Configuration::from_json(r#"{"os":"windows-11","text":"Docs"}"#).unwrap();
        editor.apply_configuration(incoming).unwrap();

        let exported = editor.export_configuration();
        assert_eq!(exported.os_style(), OsStyle::Windows11);
        assert_eq!(exported.color_variant(), "windows-11-default");
        assert_eq!(exported.label_text(), "Docs");
        assert_eq!(exported.icon(), Some(&icon));
    }
}
