pub mod completions;
pub mod crop;
pub mod info;
pub mod slice;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::error::{Result, SlicerError};
use crate::output::{Printer, Verbosity};

/// imgslice - crop images and slice them into tiles
#[derive(Parser, Debug)]
#[command(name = "imgslice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show original and preview geometry of an image
    Info(info::InfoArgs),

    /// Crop an image to a preview-space rectangle
    Crop(crop::CropArgs),

    /// Slice an image into tiles along guide lines or a grid
    Slice(slice::SliceArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Session config file (default: ./imgslice.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Longest preview axis in pixels (overrides config)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_preview: Option<u32>,

    /// Only print warnings and errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print extra detail (boundaries, per-tile lines)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn printer(&self) -> Printer {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Printer::with_verbosity(verbosity)
    }

    /// Load the session config and apply command-line overrides.
    pub fn session(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::discover(&std::env::current_dir()?)?,
        };
        if let Some(max_preview) = self.max_preview {
            config.max_preview = max_preview;
        }
        Ok(config)
    }
}

/// Write `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SlicerError::Report {
        message: format!("Failed to serialize report: {}", e),
    })?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}
