//! Exporters and download targets.
//!
//! An exporter turns a [`Canvas`](crate::Canvas) into an [`ExportedFile`];
//! a [`DownloadTarget`] delivers the file somewhere. The editor picks the
//! exporter from the configured style.

pub mod ico;
pub mod png;

pub use ico::{export_ico, export_ico_with_sizes, ICO_SIZES};
pub use png::export_png;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::OsStyle;
use crate::error::Result;

// ============================================================================
// ExportFormat
// ============================================================================

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Ico,
}

impl ExportFormat {
    /// macOS folders download as PNG, Windows 11 folders as ICO.
    pub fn for_style(style: OsStyle) -> Self {
        match style {
            OsStyle::MacOs => Self::Png,
            OsStyle::Windows11 => Self::Ico,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Ico => "ico",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Ico => "image/x-icon",
        }
    }
}

// ============================================================================
// ExportedFile
// ============================================================================

/// An encoded file ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// `<stem>.<extension>`
    pub filename: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub fn new(stem: &str, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            filename: format!("{stem}.{}", format.extension()),
            format,
            bytes,
        }
    }
}

// ============================================================================
// Download targets
// ============================================================================

/// Where downloads end up.
pub trait DownloadTarget {
    /// Delivers a finished file.
    fn download(&mut self, file: ExportedFile) -> Result<()>;
}

/// Writes downloads into a directory.
///
/// Files are written to a temporary file in the same directory first and
/// then renamed over the destination, so a failed download never leaves a
/// truncated file behind.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
    last_path: Option<PathBuf>,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_path: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recent successful download.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }
}

impl DownloadTarget for DirectoryTarget {
    fn download(&mut self, file: ExportedFile) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.filename);

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(&file.bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&path)?;

        tracing::info!(path = %path.display(), bytes = file.bytes.len(), "download written");
        self.last_path = Some(path);
        Ok(())
    }
}

/// Keeps downloads in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    files: Vec<ExportedFile>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ExportedFile] {
        &self.files
    }

    pub fn last(&self) -> Option<&ExportedFile> {
        self.files.last()
    }
}

impl DownloadTarget for MemoryTarget {
    fn download(&mut self, file: ExportedFile) -> Result<()> {
        self.files.push(file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_style() {
        assert_eq!(ExportFormat::for_style(OsStyle::MacOs), ExportFormat::Png);
        assert_eq!(ExportFormat::for_style(OsStyle::Windows11), ExportFormat::Ico);
        assert_eq!(ExportFormat::Ico.mime_type(), "image/x-icon");
    }

    #[test]
    fn exported_file_name() {
        let file = ExportedFile::new("my-icon", ExportFormat::Ico, vec![]);
        assert_eq!(file.filename, "my-icon.ico");
    }

    #[test]
    fn directory_target_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut target = DirectoryTarget::new(dir.path().join("out"));

        target
            .download(ExportedFile::new("a", ExportFormat::Png, vec![1, 2, 3]))
            .unwrap();
        let path = target.last_path().unwrap().to_path_buf();
        assert_eq!(path, dir.path().join("out").join("a.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        // Overwrites an existing download.
        target
            .download(ExportedFile::new("a", ExportFormat::Png, vec![9]))
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![9]);
        assert_eq!(std::fs::read_dir(dir.path().join("out")).unwrap().count(), 1);
    }

    #[test]
    fn memory_target_collects() {
        let mut target = MemoryTarget::new();
        target
            .download(ExportedFile::new("x", ExportFormat::Png, vec![]))
            .unwrap();
        assert_eq!(target.files().len(), 1);
        assert_eq!(target.last().unwrap().filename, "x.png");
    }
}
