//! Preview-space geometry.
//!
//! Guide-line layouts live in preview space; the coordinate mapper turns
//! preview rectangles and boundary arrays into exact original-space pixels.

mod coords;
mod layout;

use std::fmt;

use serde::Serialize;

pub use coords::{
    map_coordinate, map_lines_to_original_boundaries, map_rect_to_original_box, Boundaries,
    PixelBox, PreviewRect,
};
pub use layout::{LineTool, Orientation, SliceLayout, MAX_GRID_CELLS};

/// Image axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}
