//! Session configuration (imgslice.yaml).
//!
//! Holds the settings the front end remembers between runs: where slices
//! go, the preview cap, JPEG quality and the last manual line tool. The
//! values are handed to operations explicitly as [`SaveOptions`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::{SaveOptions, DEFAULT_JPEG_QUALITY};
use crate::document::DEFAULT_MAX_PREVIEW;
use crate::error::{Result, SlicerError};
use crate::geometry::LineTool;

/// The name of the session config file.
pub const CONFIG_FILENAME: &str = "imgslice.yaml";

/// Session settings loaded from imgslice.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Root directory for slice output. Defaults to the source image's
    /// directory when unset.
    pub output_root: Option<PathBuf>,

    /// Longest preview axis in pixels.
    pub max_preview: u32,

    /// JPEG quality for lossy output.
    pub jpeg_quality: u8,

    /// Tool applied to `--at` points in manual mode.
    pub line_tool: LineTool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_root: None,
            max_preview: DEFAULT_MAX_PREVIEW,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            line_tool: LineTool::default(),
        }
    }
}

impl SessionConfig {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SlicerError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `imgslice.yaml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| SlicerError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SlicerError::Parse {
                message: format!("jpeg_quality must be 1-100, got {}", self.jpeg_quality),
                help: None,
            });
        }
        if self.max_preview == 0 {
            return Err(SlicerError::Parse {
                message: "max_preview must be at least 1".to_string(),
                help: None,
            });
        }
        Ok(())
    }

    /// Slice output root for `source`: the configured root, else the
    /// directory holding the source.
    pub fn output_root_for(&self, source: &Path) -> PathBuf {
        if let Some(root) = &self.output_root {
            return root.clone();
        }
        match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            jpeg_quality: self.jpeg_quality,
            max_preview: self.max_preview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_config() {
        let config = SessionConfig::parse("output_root: exports").unwrap();

        assert_eq!(config.output_root, Some(PathBuf::from("exports")));
        assert_eq!(config.max_preview, 4000);
        assert_eq!(config.jpeg_quality, 95);
        assert_eq!(config.line_tool, LineTool::Cross);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
output_root: out/tiles
max_preview: 2048
jpeg_quality: 80
line_tool: horizontal
"#;
        let config = SessionConfig::parse(yaml).unwrap();

        assert_eq!(config.output_root, Some(PathBuf::from("out/tiles")));
        assert_eq!(config.max_preview, 2048);
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.line_tool, LineTool::Horizontal);
        assert_eq!(
            config.save_options(),
            SaveOptions {
                jpeg_quality: 80,
                max_preview: 2048
            }
        );
    }

    #[test]
    fn test_rejects_bad_quality() {
        assert!(SessionConfig::parse("jpeg_quality: 0").is_err());
        assert!(SessionConfig::parse("jpeg_quality: 101").is_err());
    }

    #[test]
    fn test_rejects_zero_preview() {
        assert!(SessionConfig::parse("max_preview: 0").is_err());
    }

    #[test]
    fn test_rejects_unknown_tool() {
        assert!(SessionConfig::parse("line_tool: diagonal").is_err());
    }

    #[test]
    fn test_output_root_defaults_to_source_dir() {
        let config = SessionConfig::default();
        assert_eq!(
            config.output_root_for(Path::new("photos/cat.png")),
            PathBuf::from("photos")
        );
        assert_eq!(config.output_root_for(Path::new("cat.png")), PathBuf::from("."));
    }

    #[test]
    fn test_discover() {
        let dir = tempdir().unwrap();
        assert_eq!(SessionConfig::discover(dir.path()).unwrap(), SessionConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILENAME), "max_preview: 512\n").unwrap();
        assert_eq!(SessionConfig::discover(dir.path()).unwrap().max_preview, 512);
    }
}
