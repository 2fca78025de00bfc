use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Where the rendered image goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Plain-text PPM streamed to stdout
    Stdout,
    Ppm(PathBuf),
    Png(PathBuf),
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lux")]
#[command(about = "A recursive CPU ray tracer")]
pub struct Args {
    /// JSON scene description (renders the book cover scene when omitted)
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output path: `-` for PPM on stdout, or a .ppm / .png file
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the aspect ratio (width / height)
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    /// Override the number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the random source; renders with the same seed are identical
    #[arg(long)]
    pub seed: Option<u64>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Resolve the output argument by file extension.
    pub fn output_target(&self) -> Result<OutputTarget> {
        if self.output == "-" {
            return Ok(OutputTarget::Stdout);
        }

        let path = PathBuf::from(&self.output);
        let extension = Path::new(&self.output)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("ppm") => Ok(OutputTarget::Ppm(path)),
            Some("png") => Ok(OutputTarget::Png(path)),
            Some(other) => bail!("Unsupported output extension '.{other}', use .ppm or .png"),
            None => bail!("Output '{}' has no extension, use .ppm or .png", self.output),
        }
    }
}
