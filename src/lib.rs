//! imgslice - image cropping and tile slicing
//!
//! A library for mapping preview-space selections onto full-resolution
//! images: crop rectangles become exact pixel boxes, and guide lines become
//! tile boundaries for slicing an image into a grid of files.

pub mod cli;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod ops;
pub mod output;

pub use codec::{decode, encode, SaveOptions, DEFAULT_JPEG_QUALITY};
pub use config::{SessionConfig, CONFIG_FILENAME};
pub use document::{ImageDocument, PreviewGeometry, DEFAULT_MAX_PREVIEW};
pub use error::{Result, SlicerError};
pub use geometry::{
    map_coordinate, map_lines_to_original_boundaries, map_rect_to_original_box, Axis,
    Boundaries, LineTool, Orientation, PixelBox, PreviewRect, SliceLayout, MAX_GRID_CELLS,
};
pub use ops::{
    crop_to_new_document, plan_tiles, slice_to_tiles, slice_with_report, SliceReport, Tile,
};
