//! Tunable detection parameters.
//!
//! Every threshold used by the lip detector lives here so rules can be
//! exercised one at a time and overridden from `facetone.yaml`. The defaults
//! are hand-tuned for frontal portraits with the mouth in the lower third;
//! they are not derived from a validated model.

use serde::{Deserialize, Serialize};

use crate::error::{FaceError, Result};

/// Fractional bounding box, relative to image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionBox {
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl Default for RegionBox {
    fn default() -> Self {
        Self {
            x_start: 0.3,
            x_end: 0.7,
            y_start: 0.55,
            y_end: 0.85,
        }
    }
}

/// A scan box resolved to pixel coordinates; `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x_start: u32,
    pub x_end: u32,
    pub y_start: u32,
    pub y_end: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> u32 {
        self.y_end - self.y_start
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

impl RegionBox {
    /// Reject fractions outside `[0, 1]` or inverted ranges.
    pub fn validate(&self) -> Result<()> {
        let fractions = [self.x_start, self.x_end, self.y_start, self.y_end];
        if fractions.iter().any(|f| !(0.0..=1.0).contains(f)) {
            return Err(FaceError::Validation {
                message: format!("Region box {:?} has fractions outside 0..=1", self),
                help: None,
            });
        }
        if self.x_start > self.x_end || self.y_start > self.y_end {
            return Err(FaceError::Validation {
                message: format!("Region box {:?} is inverted", self),
                help: Some("Start fractions must not exceed end fractions".to_string()),
            });
        }
        Ok(())
    }

    /// Resolve to pixel bounds, flooring each edge.
    pub fn resolve(&self, width: u32, height: u32) -> Result<PixelRect> {
        self.validate()?;
        let edge = |fraction: f64, size: u32| (f64::from(size) * fraction).floor() as u32;
        Ok(PixelRect {
            x_start: edge(self.x_start, width),
            x_end: edge(self.x_end, width),
            y_start: edge(self.y_start, height),
            y_end: edge(self.y_end, height),
        })
    }
}

/// Colour and position rules; each contributes its `*_score` when satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    /// Minimum `r / max(g, b, 1)` for a reddish pixel.
    pub red_dominance_min: f64,
    pub red_score: f64,

    /// Open saturation interval.
    pub saturation_min: f64,
    pub saturation_max: f64,
    pub saturation_score: f64,

    /// Open brightness interval, brightness being mean channel / 255.
    pub brightness_min: f64,
    pub brightness_max: f64,
    pub brightness_score: f64,

    /// Horizontal distance from centre, over half-width, must stay below this.
    pub center_band: f64,
    pub center_score: f64,

    /// Expected mouth line as a fraction of height.
    pub anchor_y: f64,
    /// Vertical distance is normalised by `height * anchor_spread`.
    pub anchor_spread: f64,
    /// Normalised distance from the anchor line must stay below this.
    pub anchor_band: f64,
    pub anchor_score: f64,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            red_dominance_min: 1.1,
            red_score: 0.4,
            saturation_min: 0.15,
            saturation_max: 0.8,
            saturation_score: 0.3,
            brightness_min: 0.2,
            brightness_max: 0.7,
            brightness_score: 0.2,
            center_band: 0.3,
            center_score: 0.3,
            anchor_y: 0.7,
            anchor_spread: 0.1,
            anchor_band: 1.0,
            anchor_score: 0.4,
        }
    }
}

impl ScoreTable {
    /// Every entry must be finite; the anchor spread must be positive.
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("red_dominance_min", self.red_dominance_min),
            ("red_score", self.red_score),
            ("saturation_min", self.saturation_min),
            ("saturation_max", self.saturation_max),
            ("saturation_score", self.saturation_score),
            ("brightness_min", self.brightness_min),
            ("brightness_max", self.brightness_max),
            ("brightness_score", self.brightness_score),
            ("center_band", self.center_band),
            ("center_score", self.center_score),
            ("anchor_y", self.anchor_y),
            ("anchor_spread", self.anchor_spread),
            ("anchor_band", self.anchor_band),
            ("anchor_score", self.anchor_score),
        ];
        if let Some((name, value)) = entries.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FaceError::Validation {
                message: format!("detection.scores.{} is not a finite number ({})", name, value),
                help: None,
            });
        }
        if self.anchor_spread <= 0.0 {
            return Err(FaceError::Validation {
                message: format!(
                    "detection.scores.anchor_spread must be positive, got {}",
                    self.anchor_spread
                ),
                help: None,
            });
        }
        Ok(())
    }
}

/// Default cap on scanned pixels.
pub const DEFAULT_MAX_SCAN_AREA: u64 = 4_000_000;

/// Full detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub region: RegionBox,
    pub scores: ScoreTable,
    /// Pixels scoring above this are collected during the scan.
    pub scan_threshold: f64,
    /// Collected pixels scoring above this are returned.
    pub accept_threshold: f64,
    /// Largest scan box, in pixels, the detector will read.
    pub max_scan_area: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            region: RegionBox::default(),
            scores: ScoreTable::default(),
            scan_threshold: 0.4,
            accept_threshold: 0.5,
            max_scan_area: DEFAULT_MAX_SCAN_AREA,
        }
    }
}

impl DetectionConfig {
    /// Check the region, the score table and both thresholds.
    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        self.scores.validate()?;
        for (name, value) in [
            ("scan_threshold", self.scan_threshold),
            ("accept_threshold", self.accept_threshold),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(FaceError::Validation {
                    message: format!("detection.{} must be between 0 and 1, got {}", name, value),
                    help: Some("Confidences are capped at 1.0".to_string()),
                });
            }
        }
        Ok(())
    }
}
