//! Guide-line layout in preview space.
//!
//! A layout is a plain data model: the front end turns clicks and drags
//! into `add_line`/`move_line`/`remove_nearest` calls and redraws from the
//! resulting line sets. Boundary arrays are derived on demand.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlicerError};

/// Largest row or column count accepted by grid generation.
pub const MAX_GRID_CELLS: u32 = 100;

/// Direction of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Cuts across the image at a fixed y.
    Horizontal,
    /// Cuts down the image at a fixed x.
    Vertical,
}

/// Manual line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineTool {
    Horizontal,
    Vertical,
    #[default]
    Cross,
    Select,
}

/// Horizontal and vertical guide lines in preview space.
///
/// Insertion order is irrelevant. [`SliceLayout::normalize`] brings both
/// sets into sorted, deduplicated form with every value strictly inside the
/// preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceLayout {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
}

impl SliceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an evenly spaced grid of `rows` x `cols` cells.
    ///
    /// Grid mode rebuilds the whole layout whenever the counts change, so
    /// this always returns a fresh value.
    pub fn grid(rows: u32, cols: u32, preview_width: u32, preview_height: u32) -> Result<Self> {
        let valid = 1..=MAX_GRID_CELLS;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(SlicerError::InvalidGrid { rows, cols });
        }

        let mut layout = Self {
            horizontal: even_positions(rows, preview_height),
            vertical: even_positions(cols, preview_width),
        };
        layout.normalize(preview_width, preview_height);
        Ok(layout)
    }

    pub fn lines(&self, orientation: Orientation) -> &[f64] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    fn lines_mut(&mut self, orientation: Orientation) -> &mut Vec<f64> {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }

    /// Add a line, clamping its position onto the preview.
    ///
    /// A clamped line that lands on an edge is kept here and dropped later
    /// by `normalize`.
    pub fn add_line(
        &mut self,
        orientation: Orientation,
        position: f64,
        preview_width: u32,
        preview_height: u32,
    ) {
        let limit = match orientation {
            Orientation::Horizontal => f64::from(preview_height),
            Orientation::Vertical => f64::from(preview_width),
        };
        if position.is_nan() {
            return;
        }
        self.lines_mut(orientation).push(position.clamp(0.0, limit));
    }

    /// Apply a manual tool at preview point `(x, y)`.
    pub fn apply_tool(
        &mut self,
        tool: LineTool,
        x: f64,
        y: f64,
        preview_width: u32,
        preview_height: u32,
    ) {
        match tool {
            LineTool::Horizontal => {
                self.add_line(Orientation::Horizontal, y, preview_width, preview_height)
            }
            LineTool::Vertical => {
                self.add_line(Orientation::Vertical, x, preview_width, preview_height)
            }
            LineTool::Cross => {
                self.add_line(Orientation::Horizontal, y, preview_width, preview_height);
                self.add_line(Orientation::Vertical, x, preview_width, preview_height);
            }
            LineTool::Select => {}
        }
    }

    /// Index of the line closest to `position`, if within `tolerance`.
    fn nearest(&self, orientation: Orientation, position: f64, tolerance: f64) -> Option<usize> {
        self.lines(orientation)
            .iter()
            .enumerate()
            .map(|(i, v)| (i, (v - position).abs()))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Remove the line nearest to `position` and return its value.
    pub fn remove_nearest(
        &mut self,
        orientation: Orientation,
        position: f64,
        tolerance: f64,
    ) -> Option<f64> {
        let index = self.nearest(orientation, position, tolerance)?;
        Some(self.lines_mut(orientation).remove(index))
    }

    /// Drag the line nearest to `from` over to `to`.
    ///
    /// Returns false when no line is within `tolerance` of `from`.
    pub fn move_line(
        &mut self,
        orientation: Orientation,
        from: f64,
        to: f64,
        tolerance: f64,
        preview_width: u32,
        preview_height: u32,
    ) -> bool {
        if self.remove_nearest(orientation, from, tolerance).is_none() {
            return false;
        }
        self.add_line(orientation, to, preview_width, preview_height);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    /// Drop lines outside the open interval `(0, dimension)`, then sort and
    /// deduplicate both sets. Idempotent.
    pub fn normalize(&mut self, preview_width: u32, preview_height: u32) {
        normalize_axis(&mut self.horizontal, f64::from(preview_height));
        normalize_axis(&mut self.vertical, f64::from(preview_width));
    }

    /// Boundary arrays including both edges: `(xs, ys)`.
    ///
    /// Normalizes the layout first, so the arrays always reflect the
    /// cleaned state and never repeat an edge.
    pub fn boundaries(&mut self, preview_width: u32, preview_height: u32) -> (Vec<f64>, Vec<f64>) {
        self.normalize(preview_width, preview_height);

        let xs = with_edges(&self.vertical, preview_width);
        let ys = with_edges(&self.horizontal, preview_height);
        (xs, ys)
    }

    /// Number of tiles the layout would produce over the preview.
    pub fn tile_count(&mut self, preview_width: u32, preview_height: u32) -> usize {
        let (xs, ys) = self.boundaries(preview_width, preview_height);
        let cols = xs.windows(2).filter(|w| w[1] > w[0]).count();
        let rows = ys.windows(2).filter(|w| w[1] > w[0]).count();
        (rows * cols).max(1)
    }
}

fn even_positions(count: u32, dimension: u32) -> Vec<f64> {
    (1..count)
        .map(|i| f64::from(i) * f64::from(dimension) / f64::from(count))
        .collect()
}

fn normalize_axis(lines: &mut Vec<f64>, limit: f64) {
    lines.retain(|v| v.is_finite() && *v > 0.0 && *v < limit);
    lines.sort_by(f64::total_cmp);
    lines.dedup();
}

fn with_edges(lines: &[f64], dimension: u32) -> Vec<f64> {
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(0.0);
    out.extend_from_slice(lines);
    out.push(f64::from(dimension));
    out
}
