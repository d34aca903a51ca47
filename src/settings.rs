//! Settings file (facetone.yaml) parsing.
//!
//! Every field has a default, so an empty or partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{EncodeOptions, DEFAULT_QUALITY};
use crate::detect::DetectionConfig;
use crate::error::{FaceError, Result};
use crate::render::OverlayConfig;

/// Settings filename looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "facetone.yaml";

/// Settings loaded from facetone.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output directory for processed images.
    pub output: PathBuf,

    /// JPEG quality for written images.
    pub quality: u8,

    /// Detector region, scoring rules and limits.
    pub detection: DetectionConfig,

    /// Fallback ellipse placement.
    pub overlay: OverlayConfig,
}

fn default_output() -> PathBuf {
    PathBuf::from("out")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: default_output(),
            quality: DEFAULT_QUALITY,
            detection: DetectionConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FaceError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(content).map_err(|e| FaceError::Parse {
            message: format!("Invalid settings: {}", e),
            help: Some(format!("Check {} syntax", SETTINGS_FILENAME)),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `dir/facetone.yaml` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILENAME);
        if path.is_file() {
            debug!(path = %path.display(), "loading settings");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        self.overlay.validate()?;
        if self.quality == 0 || self.quality > 100 {
            return Err(FaceError::Validation {
                message: format!("quality must be between 1 and 100, got {}", self.quality),
                help: None,
            });
        }
        Ok(())
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            quality: self.quality,
        }
    }

    /// Render as YAML, as written by `facetone init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| FaceError::Parse {
            message: format!("Failed to serialize settings: {}", e),
            help: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_settings() {
        let settings = Settings::parse("output: build").unwrap();

        assert_eq!(settings.output, PathBuf::from("build"));
        assert_eq!(settings.quality, 95);
        assert_eq!(settings.detection, DetectionConfig::default());
    }

    #[test]
    fn test_parse_empty_settings() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_partial_nested() {
        let yaml = r#"
detection:
  accept_threshold: 0.6
  region:
    y_start: 0.5
overlay:
  max_alpha: 150
"#;
        let settings = Settings::parse(yaml).unwrap();

        assert_eq!(settings.detection.accept_threshold, 0.6);
        assert_eq!(settings.detection.scan_threshold, 0.4);
        assert_eq!(settings.detection.region.y_start, 0.5);
        assert_eq!(settings.detection.region.y_end, 0.85);
        assert_eq!(settings.overlay.max_alpha, 150);
        assert_eq!(settings.overlay.center_y, 0.7);
    }

    #[test]
    fn test_parse_rejects_bad_yaml() {
        let err = Settings::parse("quality: [not a number").unwrap_err();
        assert!(matches!(err, FaceError::Parse { .. }));
    }

    #[test]
    fn test_parse_rejects_inverted_region() {
        let yaml = "detection:\n  region:\n    x_start: 0.8\n    x_end: 0.2\n";
        let err = Settings::parse(yaml).unwrap_err();
        assert!(matches!(err, FaceError::Validation { .. }));
    }

    #[test]
    fn test_parse_rejects_zero_quality() {
        let err = Settings::parse("quality: 0").unwrap_err();
        assert!(matches!(err, FaceError::Validation { .. }));
    }

    #[test]
    fn test_parse_rejects_nan_threshold() {
        let err = Settings::parse("detection:\n  accept_threshold: .nan\n").unwrap_err();
        assert!(matches!(err, FaceError::Validation { .. }));
    }

    #[test]
    fn test_parse_rejects_oversized_overlay() {
        let err = Settings::parse("overlay:\n  radius_x: 50.0\n").unwrap_err();
        assert!(matches!(err, FaceError::Validation { .. }));
    }

    #[test]
    fn test_discover_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(Settings::discover(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_discover_reads_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILENAME), "quality: 80\n").unwrap();

        let settings = Settings::discover(dir.path()).unwrap();
        assert_eq!(settings.quality, 80);
        assert_eq!(settings.encode_options().quality, 80);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut settings = Settings::default();
        settings.output = PathBuf::from("renders");
        settings.detection.max_scan_area = 1_000;

        let yaml = settings.to_yaml().unwrap();
        assert_eq!(Settings::parse(&yaml).unwrap(), settings);
    }
}
