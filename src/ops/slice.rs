//! Slice a document into tiles along its guide lines.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::codec::{self, SaveOptions};
use crate::document::ImageDocument;
use crate::error::{Result, SlicerError};
use crate::geometry::{PixelBox, SliceLayout};

/// Extension used when the source file has none.
const FALLBACK_EXTENSION: &str = ".png";

/// One output tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// 1-based position in the row boundary array.
    pub row: usize,
    /// 1-based position in the column boundary array.
    pub col: usize,
    pub bounds: PixelBox,
    pub file_name: String,
}

/// Output directory plus the tiles written into it.
#[derive(Debug, Clone, Serialize)]
pub struct SliceReport {
    pub output_dir: PathBuf,
    pub tiles: Vec<Tile>,
}

/// Base name and extension (with leading dot) used for tile files.
///
/// Non-UTF-8 bytes are replaced rather than dropped so the output directory
/// still carries the source's name.
pub fn tile_naming(source: &Path) -> (String, String) {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    (stem, ext)
}

/// Compute the tile grid without touching the filesystem.
///
/// Row and column numbers follow boundary-array position, so they stay
/// contiguous even if a degenerate pair is skipped.
pub fn plan_tiles(document: &ImageDocument, layout: &mut SliceLayout) -> Result<Vec<Tile>> {
    let boundaries = document.map_layout(layout)?;
    let (stem, ext) = tile_naming(document.path());

    let mut tiles = Vec::new();
    for (r, ys) in boundaries.ys.windows(2).enumerate() {
        let (y1, y2) = (ys[0], ys[1]);
        if y2 <= y1 {
            continue;
        }

        for (c, xs) in boundaries.xs.windows(2).enumerate() {
            let (x1, x2) = (xs[0], xs[1]);
            if x2 <= x1 {
                continue;
            }

            let (row, col) = (r + 1, c + 1);
            tiles.push(Tile {
                row,
                col,
                bounds: PixelBox { x1, y1, x2, y2 },
                file_name: format!("{}_r{:02}_c{:02}{}", stem, row, col, ext),
            });
        }
    }

    Ok(tiles)
}

/// Slice `document` and write every tile under `{output_root}/{stem}/`.
///
/// A codec failure part way through leaves the tiles written so far in
/// place.
pub fn slice_with_report(
    document: &ImageDocument,
    layout: &mut SliceLayout,
    output_root: &Path,
    options: &SaveOptions,
) -> Result<SliceReport> {
    let source = document.path();
    if !source.exists() {
        return Err(SlicerError::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    if output_root.as_os_str().is_empty() {
        return Err(SlicerError::EmptyOutputRoot);
    }

    let tiles = plan_tiles(document, layout)?;

    let (stem, _) = tile_naming(source);
    let output_dir = output_root.join(&stem);
    fs::create_dir_all(&output_dir).map_err(|e| SlicerError::Io {
        path: output_dir.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let image = codec::decode(source)?;
    for tile in &tiles {
        let b = tile.bounds;
        let cropped = image.crop_imm(b.x1, b.y1, b.width(), b.height());
        codec::encode(&cropped, &output_dir.join(&tile.file_name), options)?;
    }

    Ok(SliceReport { output_dir, tiles })
}

/// Slice `document` and return the output directory.
pub fn slice_to_tiles(
    document: &ImageDocument,
    layout: &mut SliceLayout,
    output_root: &Path,
    options: &SaveOptions,
) -> Result<PathBuf> {
    slice_with_report(document, layout, output_root, options).map(|report| report.output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_image(path: &Path, w: u32, h: u32) {
        let mut img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        DynamicImage::ImageRgba8(img).save(path).unwrap();
    }

    #[test]
    fn test_tile_naming() {
        assert_eq!(
            tile_naming(Path::new("/a/b/photo.JPG")),
            ("photo".to_string(), ".JPG".to_string())
        );
        assert_eq!(
            tile_naming(Path::new("scan")),
            ("scan".to_string(), ".png".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_tile_naming_non_utf8_stem() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/a/scan\xff.png"));
        assert_eq!(
            tile_naming(path),
            ("scan\u{FFFD}".to_string(), ".png".to_string())
        );
    }

    #[test]
    fn test_plan_single_horizontal_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        write_image(&path, 600, 400);
        let doc = ImageDocument::load(&path, 4000).unwrap();

        let mut layout = SliceLayout {
            horizontal: vec![300.0],
            vertical: vec![],
        };
        let tiles = plan_tiles(&doc, &mut layout).unwrap();

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].bounds, PixelBox { x1: 0, y1: 0, x2: 600, y2: 300 });
        assert_eq!(tiles[1].bounds, PixelBox { x1: 0, y1: 300, x2: 600, y2: 400 });
        assert_eq!(tiles[1].file_name, "sheet_r02_c01.png");
    }

    #[test]
    fn test_empty_layout_writes_one_full_tile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("whole.png");
        write_image(&path, 30, 20);
        let doc = ImageDocument::load(&path, 4000).unwrap();

        let out = dir.path().join("out");
        let report =
            slice_with_report(&doc, &mut SliceLayout::new(), &out, &SaveOptions::default())
                .unwrap();

        assert_eq!(report.output_dir, out.join("whole"));
        assert_eq!(report.tiles.len(), 1);
        let tile = image::open(report.output_dir.join("whole_r01_c01.png")).unwrap();
        assert_eq!((tile.width(), tile.height()), (30, 20));
    }

    #[test]
    fn test_grid_writes_every_cell() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.png");
        write_image(&path, 90, 60);
        let doc = ImageDocument::load(&path, 4000).unwrap();

        let mut layout = SliceLayout::grid(2, 3, 90, 60).unwrap();
        let out_dir =
            slice_to_tiles(&doc, &mut layout, dir.path(), &SaveOptions::default()).unwrap();

        for row in 1..=2 {
            for col in 1..=3 {
                let tile = out_dir.join(format!("grid_r{:02}_c{:02}.png", row, col));
                let img = image::open(&tile).unwrap();
                assert_eq!((img.width(), img.height()), (30, 30));
            }
        }

        // Top-left tile carries the marker pixel
        let first = image::open(out_dir.join("grid_r01_c01.png")).unwrap().to_rgba8();
        assert_eq!(first.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_codec_failure_keeps_written_tiles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strip.png");
        write_image(&path, 40, 20);
        let doc = ImageDocument::load(&path, 4000).unwrap();

        // A directory where the second tile should go makes its encode fail
        let out = dir.path().join("out");
        let blocked = out.join("strip").join("strip_r01_c02.png");
        fs::create_dir_all(&blocked).unwrap();

        let mut layout = SliceLayout {
            horizontal: vec![],
            vertical: vec![20.0],
        };
        let err = slice_with_report(&doc, &mut layout, &out, &SaveOptions::default())
            .unwrap_err();

        assert!(matches!(err, SlicerError::Codec { .. }));
        let first = image::open(out.join("strip").join("strip_r01_c01.png")).unwrap();
        assert_eq!((first.width(), first.height()), (20, 20));
        assert!(blocked.is_dir());
    }

    #[test]
    fn test_empty_output_root() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.png");
        write_image(&path, 4, 4);
        let doc = ImageDocument::load(&path, 4000).unwrap();

        let err = slice_to_tiles(&doc, &mut SliceLayout::new(), Path::new(""), &SaveOptions::default())
            .unwrap_err();
        assert!(matches!(err, SlicerError::EmptyOutputRoot));
    }

    #[test]
    fn test_missing_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.png");
        write_image(&path, 4, 4);
        let doc = ImageDocument::load(&path, 4000).unwrap();
        fs::remove_file(&path).unwrap();

        let err = slice_to_tiles(&doc, &mut SliceLayout::new(), dir.path(), &SaveOptions::default())
            .unwrap_err();
        assert!(matches!(err, SlicerError::SourceMissing { .. }));
        assert!(!dir.path().join("gone").exists());
    }
}
