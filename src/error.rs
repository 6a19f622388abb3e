use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::geometry::Axis;

/// Main error type for imgslice operations
#[derive(Error, Diagnostic, Debug)]
pub enum SlicerError {
    #[error("IO error: {0}")]
    #[diagnostic(code(imgslice::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(imgslice::io))]
    Io { path: PathBuf, message: String },

    #[error("Source image not found: {path}")]
    #[diagnostic(
        code(imgslice::source_missing),
        help("The file may have been moved or deleted since it was loaded")
    )]
    SourceMissing { path: PathBuf },

    #[error("Invalid region: {message}")]
    #[diagnostic(code(imgslice::region))]
    InvalidRegion {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Not enough {axis} boundaries: {message}")]
    #[diagnostic(
        code(imgslice::boundaries),
        help("Guide lines collapsed onto the image edge; move them further apart")
    )]
    InsufficientBoundaries { axis: Axis, message: String },

    #[error("Output root directory is empty")]
    #[diagnostic(
        code(imgslice::output_root),
        help("Pass --output-root or set output_root in imgslice.yaml")
    )]
    EmptyOutputRoot,

    #[error("Codec error with {path}: {message}")]
    #[diagnostic(code(imgslice::codec))]
    Codec { path: PathBuf, message: String },

    #[error("Invalid grid {rows}x{cols}")]
    #[diagnostic(
        code(imgslice::grid),
        help("Rows and columns must each be between 1 and 100")
    )]
    InvalidGrid { rows: u32, cols: u32 },

    #[error("Parse error: {message}")]
    #[diagnostic(code(imgslice::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Report error: {message}")]
    #[diagnostic(code(imgslice::report))]
    Report { message: String },
}

impl SlicerError {
    pub(crate) fn codec(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        SlicerError::Codec {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlicerError>;
