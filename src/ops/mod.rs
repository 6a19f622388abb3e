//! Crop and slice operations.
//!
//! Both map preview-space input through the coordinate mapper before the
//! codec touches any pixels.

mod crop;
mod slice;

pub use crop::crop_to_new_document;
pub use slice::{
    plan_tiles, slice_to_tiles, slice_with_report, tile_naming, SliceReport, Tile,
};
