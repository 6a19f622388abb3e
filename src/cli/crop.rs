//! Crop command implementation.
//!
//! Crops an image to a rectangle given in preview space and reloads the
//! result as a new document.

use std::path::PathBuf;

use clap::{ArgGroup, Args};

use crate::document::ImageDocument;
use crate::error::Result;
use crate::geometry::PreviewRect;
use crate::ops::crop_to_new_document;
use crate::output::{display_path, Printer};

/// Crop an image to a preview-space rectangle
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["output", "in_place"])))]
pub struct CropArgs {
    /// Image file to crop
    #[arg(required = true)]
    pub input: PathBuf,

    /// Crop rectangle in preview space as X,Y,W,H (e.g. 100,100,200,150)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_rect)]
    pub rect: PreviewRect,

    /// Write the cropped image here (format follows the extension)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(long)]
    pub in_place: bool,
}

fn parse_rect(s: &str) -> Result<PreviewRect> {
    s.parse()
}

pub fn run(args: CropArgs, global: &super::GlobalArgs, printer: &Printer) -> Result<()> {
    let session = global.session()?;
    let options = session.save_options();

    printer.status("Loading", &display_path(&args.input));
    let doc = ImageDocument::load(&args.input, options.max_preview)?;

    let region = doc.map_rect(args.rect)?;
    printer.verbose(
        "Region",
        &format!(
            "preview ({}, {}, {}, {}) -> original {}",
            args.rect.x, args.rect.y, args.rect.w, args.rect.h, region
        ),
    );

    let target = args.output.unwrap_or_else(|| args.input.clone());

    printer.status(
        "Cropping",
        &format!(
            "{} to {}x{}",
            display_path(&args.input),
            region.width(),
            region.height()
        ),
    );
    let cropped = crop_to_new_document(&doc, args.rect, &target, &options)?;

    printer.info(
        "Finished",
        &format!(
            "{} ({}x{}, preview {}x{})",
            printer.cyan(&display_path(cropped.path())),
            cropped.original_width(),
            cropped.original_height(),
            cropped.preview_width(),
            cropped.preview_height()
        ),
    );

    Ok(())
}
