//! Loaded image documents.
//!
//! An [`ImageDocument`] is an immutable snapshot of one image file: its
//! original dimensions, a preview buffer capped at a maximum size, and the
//! scale factors between the two. Operations that change the backing file
//! return a new document rather than mutating this one.

mod geometry;

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::DynamicImage;

use crate::codec;
use crate::error::{Result, SlicerError};
use crate::geometry::{
    map_lines_to_original_boundaries, map_rect_to_original_box, Boundaries, PixelBox,
    PreviewRect, SliceLayout,
};

pub use geometry::{PreviewGeometry, DEFAULT_MAX_PREVIEW};

/// A decoded image plus its preview.
#[derive(Debug, Clone)]
pub struct ImageDocument {
    path: PathBuf,
    geometry: PreviewGeometry,
    preview: DynamicImage,
}

impl ImageDocument {
    /// Decode the file at `path` and build its preview.
    pub fn load(path: impl AsRef<Path>, max_preview: u32) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SlicerError::SourceMissing {
                path: path.to_path_buf(),
            });
        }

        let image = codec::decode(path)?;
        Self::from_image(path, image, max_preview)
    }

    /// Build a document from an already decoded image.
    ///
    /// The image is downscaled with a Lanczos filter only when it exceeds
    /// `max_preview` on either axis.
    pub fn from_image(path: impl Into<PathBuf>, image: DynamicImage, max_preview: u32) -> Result<Self> {
        let geometry = PreviewGeometry::new(image.width(), image.height(), max_preview)?;

        let preview = if geometry.is_downscaled() {
            image.resize_exact(
                geometry.preview_width(),
                geometry.preview_height(),
                FilterType::Lanczos3,
            )
        } else {
            image
        };

        Ok(Self {
            path: path.into(),
            geometry,
            preview,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn geometry(&self) -> &PreviewGeometry {
        &self.geometry
    }

    pub fn preview(&self) -> &DynamicImage {
        &self.preview
    }

    pub fn original_width(&self) -> u32 {
        self.geometry.original_width()
    }

    pub fn original_height(&self) -> u32 {
        self.geometry.original_height()
    }

    pub fn preview_width(&self) -> u32 {
        self.geometry.preview_width()
    }

    pub fn preview_height(&self) -> u32 {
        self.geometry.preview_height()
    }

    pub fn scale_x(&self) -> f64 {
        self.geometry.scale_x()
    }

    pub fn scale_y(&self) -> f64 {
        self.geometry.scale_y()
    }

    /// Original-space box covered by a preview rectangle.
    pub fn map_rect(&self, rect: PreviewRect) -> Result<PixelBox> {
        map_rect_to_original_box(&self.geometry, rect.x, rect.y, rect.w, rect.h)
    }

    /// Original-space tile boundaries for a layout drawn on this preview.
    pub fn map_layout(&self, layout: &mut SliceLayout) -> Result<Boundaries> {
        map_lines_to_original_boundaries(&self.geometry, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn solid(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn test_from_image_keeps_small_preview() {
        let doc = ImageDocument::from_image("mem.png", solid(40, 30), 100).unwrap();
        assert_eq!((doc.original_width(), doc.original_height()), (40, 30));
        assert_eq!((doc.preview().width(), doc.preview().height()), (40, 30));
        assert_eq!(doc.scale_x(), 1.0);
    }

    #[test]
    fn test_from_image_downscales_preview() {
        let doc = ImageDocument::from_image("mem.png", solid(400, 200), 100).unwrap();
        assert_eq!((doc.preview_width(), doc.preview_height()), (100, 50));
        assert_eq!((doc.preview().width(), doc.preview().height()), (100, 50));
        assert_eq!((doc.scale_x(), doc.scale_y()), (4.0, 4.0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = ImageDocument::load(dir.path().join("nope.png"), DEFAULT_MAX_PREVIEW).unwrap_err();
        assert!(matches!(err, SlicerError::SourceMissing { .. }));
    }

    #[test]
    fn test_load_reads_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("img.png");
        solid(64, 16).save(&path).unwrap();

        let doc = ImageDocument::load(&path, 32).unwrap();
        assert_eq!(doc.path(), path.as_path());
        assert_eq!((doc.original_width(), doc.original_height()), (64, 16));
        assert_eq!((doc.preview_width(), doc.preview_height()), (32, 8));
    }

    #[test]
    fn test_load_garbage_is_codec_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = ImageDocument::load(&path, DEFAULT_MAX_PREVIEW).unwrap_err();
        assert!(matches!(err, SlicerError::Codec { .. }));
    }

    #[test]
    fn test_map_rect_delegates() {
        let doc = ImageDocument::from_image("mem.png", solid(400, 200), 100).unwrap();
        let b = doc.map_rect(PreviewRect::new(10.0, 5.0, 20.0, 10.0)).unwrap();
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (40, 20, 120, 60));
    }
}
