//! Image decode/encode.
//!
//! Everything else in the crate sees images only through [`decode`] and
//! [`encode`]. Output format follows the target file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::document::DEFAULT_MAX_PREVIEW;
use crate::error::{Result, SlicerError};

/// Default quality for lossy JPEG output.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Options threaded through crop and slice operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// JPEG quality, 1..=100. The encoder keeps full chroma resolution.
    pub jpeg_quality: u8,
    /// Preview cap used when reloading a cropped document.
    pub max_preview: u32,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_preview: DEFAULT_MAX_PREVIEW,
        }
    }
}

/// Decode an image file, guessing the format from its contents.
///
/// Every failure, including an unreadable file, is a codec error. Callers
/// that need `SourceMissing` check for the file first.
pub fn decode(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(|e| SlicerError::codec(path, format!("Failed to open image: {}", e)))?
        .with_guessed_format()
        .map_err(|e| SlicerError::codec(path, format!("Failed to read image header: {}", e)))?
        .decode()
        .map_err(|e| SlicerError::codec(path, format!("Failed to decode image: {}", e)))
}

/// Encode `image` to `path`, overwriting any existing file.
pub fn encode(image: &DynamicImage, path: &Path, options: &SaveOptions) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .map_err(|e| SlicerError::codec(path, format!("Unsupported output format: {}", e)))?;

    match format {
        ImageFormat::Jpeg => write_jpeg(image, path, options.jpeg_quality),
        _ => image
            .save_with_format(path, format)
            .map_err(|e| SlicerError::codec(path, format!("Failed to write image: {}", e))),
    }
}

fn write_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path).map_err(|e| SlicerError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create file: {}", e),
    })?;
    let mut writer = BufWriter::new(file);

    // JPEG has no alpha channel
    let flattened;
    let image = match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
        _ => {
            flattened = DynamicImage::ImageRgb8(image.to_rgb8());
            &flattened
        }
    };

    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    image
        .write_with_encoder(encoder)
        .map_err(|e| SlicerError::codec(path, format!("Failed to write JPEG: {}", e)))?;

    writer.flush().map_err(|e| SlicerError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to flush file: {}", e),
    })
}
