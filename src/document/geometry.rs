//! Preview sizing and scale derivation.

use serde::Serialize;

use crate::error::{Result, SlicerError};

/// Default cap on the longer preview axis, in pixels.
pub const DEFAULT_MAX_PREVIEW: u32 = 4000;

/// Original and preview dimensions of a document plus the per-axis scale
/// between them.
///
/// Built once per loaded image; there are no setters. `scale_x` and
/// `scale_y` are always at least 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewGeometry {
    original_width: u32,
    original_height: u32,
    preview_width: u32,
    preview_height: u32,
    scale_x: f64,
    scale_y: f64,
}

impl PreviewGeometry {
    pub fn new(original_width: u32, original_height: u32, max_preview: u32) -> Result<Self> {
        if original_width == 0 || original_height == 0 {
            return Err(SlicerError::InvalidRegion {
                message: format!(
                    "image has zero dimensions ({}x{})",
                    original_width, original_height
                ),
                help: Some("Input image must have non-zero width and height".to_string()),
            });
        }

        let (preview_width, preview_height) =
            Self::preview_size(original_width, original_height, max_preview);

        Ok(Self {
            original_width,
            original_height,
            preview_width,
            preview_height,
            scale_x: f64::from(original_width) / f64::from(preview_width),
            scale_y: f64::from(original_height) / f64::from(preview_height),
        })
    }

    /// Preview dimensions for an original of `width` x `height`.
    ///
    /// Images within `max_preview` on both axes keep their size. Larger ones
    /// shrink by `min(max/width, max/height)` on both axes, each result
    /// rounded down and floored at 1.
    pub fn preview_size(width: u32, height: u32, max_preview: u32) -> (u32, u32) {
        let max_preview = max_preview.max(1);
        if width <= max_preview && height <= max_preview {
            return (width, height);
        }

        let max = f64::from(max_preview);
        let ratio = (max / f64::from(width)).min(max / f64::from(height));
        let shrink = |d: u32| ((f64::from(d) * ratio).floor() as u32).max(1);
        (shrink(width), shrink(height))
    }

    pub fn original_width(&self) -> u32 {
        self.original_width
    }

    pub fn original_height(&self) -> u32 {
        self.original_height
    }

    pub fn preview_width(&self) -> u32 {
        self.preview_width
    }

    pub fn preview_height(&self) -> u32 {
        self.preview_height
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn is_downscaled(&self) -> bool {
        self.preview_width != self.original_width || self.preview_height != self.original_height
    }

    /// Map an original-space pixel back into preview space.
    pub fn to_preview(&self, x: u32, y: u32) -> (f64, f64) {
        (f64::from(x) / self.scale_x, f64::from(y) / self.scale_y)
    }
}
