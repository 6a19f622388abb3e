//! Slice command implementation.
//!
//! Builds a guide-line layout from a row/column grid or from manual lines
//! in preview space, then writes one file per tile.

use std::path::PathBuf;

use clap::Args;

use crate::document::ImageDocument;
use crate::error::{Result, SlicerError};
use crate::geometry::{LineTool, Orientation, SliceLayout};
use crate::ops::{plan_tiles, slice_with_report, tile_naming, SliceReport};
use crate::output::{display_path, plural, Printer};

use super::{print_json, GlobalArgs};

/// Slice an image into tiles along guide lines or a grid
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// Image file to slice
    #[arg(required = true)]
    pub input: PathBuf,

    /// Number of rows for an even grid (1-100)
    #[arg(long, conflicts_with_all = ["hline", "vline", "at"])]
    pub rows: Option<u32>,

    /// Number of columns for an even grid (1-100)
    #[arg(long, conflicts_with_all = ["hline", "vline", "at"])]
    pub cols: Option<u32>,

    /// Horizontal guide line at this preview y (repeatable)
    #[arg(long = "hline", value_name = "Y", allow_hyphen_values = true)]
    pub hline: Vec<f64>,

    /// Vertical guide line at this preview x (repeatable)
    #[arg(long = "vline", value_name = "X", allow_hyphen_values = true)]
    pub vline: Vec<f64>,

    /// Apply the manual line tool at preview point X,Y (repeatable)
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true, value_parser = parse_point)]
    pub at: Vec<(f64, f64)>,

    /// Tool for --at points (default: line_tool from config)
    #[arg(long, value_enum)]
    pub tool: Option<LineTool>,

    /// Root directory for output; tiles go into a subdirectory named after
    /// the image (default: config output_root, else the image's directory)
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    /// Compute tiles without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print the tile report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Parse an `X,Y` point.
fn parse_point(s: &str) -> Result<(f64, f64)> {
    let invalid = || SlicerError::Parse {
        message: format!("Invalid point '{}': expected X,Y", s),
        help: Some("Use preview-space coordinates, for example: 120,80".to_string()),
    };

    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

/// Build the layout for this run: a fresh grid, or manual lines.
///
/// The result is normalized, so lines that landed on an edge are gone.
fn build_layout(args: &SliceArgs, tool: LineTool, doc: &ImageDocument) -> Result<SliceLayout> {
    let (pw, ph) = (doc.preview_width(), doc.preview_height());

    if args.rows.is_some() || args.cols.is_some() {
        return SliceLayout::grid(args.rows.unwrap_or(1), args.cols.unwrap_or(1), pw, ph);
    }

    let mut layout = SliceLayout::new();
    for &y in &args.hline {
        layout.add_line(Orientation::Horizontal, y, pw, ph);
    }
    for &x in &args.vline {
        layout.add_line(Orientation::Vertical, x, pw, ph);
    }
    for &(x, y) in &args.at {
        layout.apply_tool(tool, x, y, pw, ph);
    }
    layout.normalize(pw, ph);
    Ok(layout)
}

pub fn run(args: SliceArgs, global: &GlobalArgs, printer: &Printer) -> Result<()> {
    let session = global.session()?;
    let options = session.save_options();
    let display = display_path(&args.input);

    printer.status("Loading", &display);
    let doc = ImageDocument::load(&args.input, options.max_preview)?;
    printer.verbose(
        "Preview",
        &format!(
            "{}x{} (original {}x{})",
            doc.preview_width(),
            doc.preview_height(),
            doc.original_width(),
            doc.original_height()
        ),
    );

    let tool = args.tool.unwrap_or(session.line_tool);
    if !args.at.is_empty() && tool == LineTool::Select {
        printer.warning("Warning", "select tool adds no lines; --at points ignored");
    }

    let mut layout = build_layout(&args, tool, &doc)?;
    if layout.is_empty() {
        printer.warning(
            "Warning",
            "no guide lines; exporting the whole image as a single tile",
        );
    }

    let boundaries = doc.map_layout(&mut layout)?;
    printer.verbose("Columns", &format!("{:?}", boundaries.xs));
    printer.verbose("Rows", &format!("{:?}", boundaries.ys));

    let output_root = args
        .output_root
        .clone()
        .unwrap_or_else(|| session.output_root_for(&args.input));

    let report = if args.dry_run {
        let (stem, _) = tile_naming(doc.path());
        SliceReport {
            output_dir: output_root.join(stem),
            tiles: plan_tiles(&doc, &mut layout)?,
        }
    } else {
        printer.status(
            "Slicing",
            &format!(
                "{} ({}x{} grid)",
                display,
                boundaries.xs.len() - 1,
                boundaries.ys.len() - 1
            ),
        );
        slice_with_report(&doc, &mut layout, &output_root, &options)?
    };

    for tile in &report.tiles {
        printer.verbose(
            if args.dry_run { "Would write" } else { "Wrote" },
            &format!("{} {}", tile.file_name, tile.bounds),
        );
    }

    if args.json {
        print_json(&report)?;
    }

    let verb = if args.dry_run { "Planned" } else { "Finished" };
    printer.info(
        verb,
        &format!(
            "{} in {}",
            plural(report.tiles.len(), "tile", "tiles"),
            printer.cyan(&display_path(&report.output_dir))
        ),
    );

    Ok(())
}
