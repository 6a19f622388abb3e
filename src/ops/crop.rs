//! Crop a document to a preview-space rectangle.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{self, SaveOptions};
use crate::document::ImageDocument;
use crate::error::{Result, SlicerError};
use crate::geometry::PreviewRect;

/// Crop `document` to `rect` and write the result to `target`.
///
/// `target` may be the document's own path. The source is fully decoded
/// before anything is written, and the encoded result is staged in a
/// sibling file that replaces `target` only once it is complete, so a
/// failed encode never truncates an existing file. On success the returned
/// document is loaded from `target`; the old one describes a file that may
/// no longer match.
pub fn crop_to_new_document(
    document: &ImageDocument,
    rect: PreviewRect,
    target: &Path,
    options: &SaveOptions,
) -> Result<ImageDocument> {
    let source = document.path();
    if !source.exists() {
        return Err(SlicerError::SourceMissing {
            path: source.to_path_buf(),
        });
    }

    let region = document.map_rect(rect)?;

    let image = codec::decode(source)?;
    let cropped = image.crop_imm(region.x1, region.y1, region.width(), region.height());

    let staging = staging_path(target);
    if let Err(e) = codec::encode(&cropped, &staging, options) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    fs::rename(&staging, target).map_err(|e| SlicerError::Io {
        path: target.to_path_buf(),
        message: format!("Failed to replace file: {}", e),
    })?;

    ImageDocument::load(target, options.max_preview)
}

/// Hidden sibling of `target` that keeps its extension for format lookup.
fn staging_path(target: &Path) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let name = match target.extension() {
        Some(ext) => format!(".{}.partial.{}", stem, ext.to_string_lossy()),
        None => format!(".{}.partial", stem),
    };
    target.with_file_name(name)
}
