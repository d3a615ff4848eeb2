//! `folder-art` command-line front end.
//!
//! Builds a configuration from a JSON file and/or flags, renders the folder
//! and writes `<filename>.png` (macOS) or `<filename>.ico` (Windows 11) into
//! the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folder_art::{
    ConfigUpdate, Configuration, DirectoryTarget, Editor, IconFile, OsStyle,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "folder-art", version, about = "Render custom macOS and Windows 11 folder icons")]
struct Cli {
    /// JSON configuration file applied before any other flag.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Operating-system style of the folder.
    #[arg(long, value_enum)]
    os: Option<OsStyle>,

    /// Color variant id (see --list-colors).
    #[arg(long)]
    color: Option<String>,

    /// Brightness of the imprinted icon, 0.0 to 2.0.
    #[arg(long)]
    adjust_color: Option<f32>,

    /// Image to place on the folder.
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Label drawn under the icon.
    #[arg(long)]
    text: Option<String>,

    /// Output file name without extension.
    #[arg(long)]
    filename: Option<String>,

    /// Directory the icon is written to.
    #[arg(long, short, default_value = ".")]
    out: PathBuf,

    /// List the color variants of the selected style and exit.
    #[arg(long)]
    list_colors: bool,

    /// Print the resulting configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,

    /// Print the configuration JSON Schema and exit.
    #[cfg(feature = "jsonschema")]
    #[arg(long)]
    schema: bool,
}

/// Logs go to stderr; `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

/// Folds the config file and flags into one configuration, so the canvas
/// is rendered a single time.
fn build_configuration(cli: &Cli) -> Result<Configuration> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            Configuration::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Configuration::default(),
    };

    if let Some(os) = cli.os {
        config.apply(ConfigUpdate::OsStyle(os))?;
    }
    if let Some(color) = &cli.color {
        config
            .apply(ConfigUpdate::ColorVariant(color.clone()))
            .context("use --list-colors to see the variants of the selected style")?;
    }
    if let Some(adjust) = cli.adjust_color {
        config.apply(ConfigUpdate::ColorAdjustment(adjust))?;
    }
    if let Some(text) = &cli.text {
        config.apply(ConfigUpdate::LabelText(text.clone()))?;
    }
    if let Some(filename) = &cli.filename {
        config.apply(ConfigUpdate::OutputFilename(filename.clone()))?;
    }
    if let Some(path) = &cli.icon {
        let file = IconFile::from_path(path)
            .with_context(|| format!("failed to read icon {}", path.display()))?;
        if file.is_image() {
            config.apply(ConfigUpdate::IconImage(Some(file)))?;
        } else {
            warn!(path = %path.display(), "not an image, icon left empty");
        }
    }

    Ok(config)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    #[cfg(feature = "jsonschema")]
    {
        if cli.schema {
            println!("{}", Configuration::json_schema()?);
            return Ok(());
        }
    }

    let config = build_configuration(&cli)?;

    if cli.list_colors {
        for variant in config.os_style().variants() {
            println!("{:<24} {}", variant.id, variant.name);
        }
        return Ok(());
    }

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let editor = Editor::with_configuration(config).context("failed to render folder")?;
    let config = editor.configuration();
    let mut target = DirectoryTarget::new(&cli.out);
    editor
        .download(&mut target)
        .with_context(|| format!("failed to write {}", editor.download_filename()))?;

    if let Some(path) = target.last_path() {
        info!(style = %config.os_style(), "saved {}", path.display());
        println!("{}", path.display());
    }
    Ok(())
}
