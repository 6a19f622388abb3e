//! Preview-space to original-space coordinate mapping.
//!
//! Every mapped value goes through [`map_coordinate`]: multiply by the
//! axis scale, round half to even, clamp onto the original image.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::document::PreviewGeometry;
use crate::error::{Result, SlicerError};

use super::{Axis, SliceLayout};

/// A rectangle in preview space: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PreviewRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

impl FromStr for PreviewRect {
    type Err = SlicerError;

    /// Parse `X,Y,W,H`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(SlicerError::Parse {
                message: format!("Invalid rectangle '{}': expected X,Y,W,H", s),
                help: Some("Use preview-space coordinates, for example: 100,100,200,150".to_string()),
            });
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| SlicerError::Parse {
                message: format!("Invalid number '{}' in rectangle '{}'", part, s),
                help: None,
            })?;
        }

        let [x, y, w, h] = values;
        Ok(Self { x, y, w, h })
    }
}

/// An integer pixel box in original space, `x2`/`y2` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl PixelBox {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

impl fmt::Display for PixelBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})..({}, {}) {}x{}",
            self.x1,
            self.y1,
            self.x2,
            self.y2,
            self.width(),
            self.height()
        )
    }
}

/// Original-space tile boundaries, both axes sorted and distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boundaries {
    pub xs: Vec<u32>,
    pub ys: Vec<u32>,
}

/// Map one preview-space value onto an original-space pixel coordinate.
///
/// Rounds half to even, so `2.5` maps to `2` and `3.5` to `4`, then clamps
/// into `[0, limit]`.
pub fn map_coordinate(value: f64, scale: f64, limit: u32) -> u32 {
    let scaled = (value * scale).round_ties_even();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, f64::from(limit)) as u32
}

/// Map a preview rectangle to the original-space box it covers.
pub fn map_rect_to_original_box(
    geometry: &PreviewGeometry,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) -> Result<PixelBox> {
    if !(w > 0.0 && h > 0.0) {
        return Err(SlicerError::InvalidRegion {
            message: format!("width and height must be positive, got {}x{}", w, h),
            help: Some("Drag a rectangle with a non-zero size".to_string()),
        });
    }
    if ![x, y, w, h].iter().all(|v| v.is_finite()) {
        return Err(SlicerError::InvalidRegion {
            message: "rectangle coordinates must be finite".to_string(),
            help: None,
        });
    }

    let (ow, oh) = (geometry.original_width(), geometry.original_height());
    let (sx, sy) = (geometry.scale_x(), geometry.scale_y());

    let pixel_box = PixelBox {
        x1: map_coordinate(x, sx, ow),
        y1: map_coordinate(y, sy, oh),
        x2: map_coordinate(x + w, sx, ow),
        y2: map_coordinate(y + h, sy, oh),
    };

    if pixel_box.x2 <= pixel_box.x1 || pixel_box.y2 <= pixel_box.y1 {
        return Err(SlicerError::InvalidRegion {
            message: format!(
                "region ({}, {}, {}, {}) covers no pixels of the {}x{} image",
                x, y, w, h, ow, oh
            ),
            help: Some("Select an area that overlaps the image".to_string()),
        });
    }

    Ok(pixel_box)
}

/// Map a layout's boundary arrays into original space.
///
/// Rounding happens after the preview-space sort; lines that collapse onto
/// the same original pixel are merged here.
pub fn map_lines_to_original_boundaries(
    geometry: &PreviewGeometry,
    layout: &mut SliceLayout,
) -> Result<Boundaries> {
    let (xs, ys) = layout.boundaries(geometry.preview_width(), geometry.preview_height());

    let xs = map_axis(&xs, geometry.scale_x(), geometry.original_width());
    let ys = map_axis(&ys, geometry.scale_y(), geometry.original_height());

    for (axis, values) in [(Axis::X, &xs), (Axis::Y, &ys)] {
        if values.len() < 2 {
            return Err(SlicerError::InsufficientBoundaries {
                axis,
                message: format!("only {} distinct boundary after mapping", values.len()),
            });
        }
    }

    Ok(Boundaries { xs, ys })
}

fn map_axis(values: &[f64], scale: f64, limit: u32) -> Vec<u32> {
    let mut mapped: Vec<u32> = values
        .iter()
        .map(|v| map_coordinate(*v, scale, limit))
        .collect();
    mapped.sort_unstable();
    mapped.dedup();
    mapped
}
