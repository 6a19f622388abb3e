//! Info command implementation.
//!
//! Loads an image and reports the geometry that crop rectangles and guide
//! lines are measured against.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::document::{ImageDocument, PreviewGeometry};
use crate::error::Result;
use crate::output::{display_path, format_scale, Printer};

use super::{print_json, GlobalArgs};

/// Show original and preview geometry of an image
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Image file to inspect
    #[arg(required = true)]
    pub input: PathBuf,

    /// Print geometry as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    path: String,
    #[serde(flatten)]
    geometry: &'a PreviewGeometry,
}

pub fn run(args: InfoArgs, global: &GlobalArgs, printer: &Printer) -> Result<()> {
    let session = global.session()?;
    let display = display_path(&args.input);

    printer.status("Loading", &display);
    let doc = ImageDocument::load(&args.input, session.max_preview)?;
    let g = doc.geometry();

    if args.json {
        return print_json(&InfoReport {
            path: display,
            geometry: g,
        });
    }

    printer.info(
        "Original",
        &format!("{}x{}", g.original_width(), g.original_height()),
    );
    printer.info(
        "Preview",
        &format!("{}x{}", g.preview_width(), g.preview_height()),
    );
    printer.info(
        "Scale",
        &format!("{} x {}", format_scale(g.scale_x()), format_scale(g.scale_y())),
    );
    if !g.is_downscaled() {
        printer.verbose("Preview", "same as original; coordinates map 1:1");
    }

    Ok(())
}
