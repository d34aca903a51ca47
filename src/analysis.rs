//! Rule-based image summary.
//!
//! The report is derived from global pixel statistics with fixed thresholds.
//! It describes the image; it does not locate or measure facial features.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::types::{PixelBuffer, ReshapeKind};

/// Mean luma below this reads as dark.
const DARK_BELOW: f64 = 85.0;
/// Mean luma above this reads as bright.
const BRIGHT_ABOVE: f64 = 170.0;
/// Luma deviation below this reads as flat.
const FLAT_BELOW: f64 = 30.0;
/// Luma deviation above this reads as high contrast.
const HIGH_ABOVE: f64 = 70.0;
/// Red minus blue beyond this reads as warm or cool.
const WARMTH_MARGIN: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrightnessLabel {
    Dark,
    Balanced,
    Bright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastLabel {
    Flat,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarmthLabel {
    Cool,
    Neutral,
    Warm,
}

/// A suggested preset and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub preset: ReshapeKind,
    pub reason: String,
}

/// Summary statistics, labels and preset suggestions for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    /// Mean Rec. 601 luma, 0..=255.
    pub brightness: f64,
    /// Standard deviation of luma.
    pub contrast: f64,
    /// Mean red minus mean blue.
    pub warmth: f64,
    pub brightness_label: BrightnessLabel,
    pub contrast_label: ContrastLabel,
    pub warmth_label: WarmthLabel,
    pub recommendations: Vec<Recommendation>,
}

/// Summarise `buffer`.
pub fn analyze(buffer: &PixelBuffer) -> AnalysisReport {
    let stats = Stats::collect(buffer);

    let orientation = match buffer.width().cmp(&buffer.height()) {
        std::cmp::Ordering::Less => Orientation::Portrait,
        std::cmp::Ordering::Greater => Orientation::Landscape,
        std::cmp::Ordering::Equal => Orientation::Square,
    };

    let brightness_label = if stats.mean_luma < DARK_BELOW {
        BrightnessLabel::Dark
    } else if stats.mean_luma > BRIGHT_ABOVE {
        BrightnessLabel::Bright
    } else {
        BrightnessLabel::Balanced
    };

    let contrast_label = if stats.luma_deviation < FLAT_BELOW {
        ContrastLabel::Flat
    } else if stats.luma_deviation > HIGH_ABOVE {
        ContrastLabel::High
    } else {
        ContrastLabel::Moderate
    };

    let warmth = stats.mean_red - stats.mean_blue;
    let warmth_label = if warmth > WARMTH_MARGIN {
        WarmthLabel::Warm
    } else if warmth < -WARMTH_MARGIN {
        WarmthLabel::Cool
    } else {
        WarmthLabel::Neutral
    };

    let recommendations = recommend(brightness_label, contrast_label, warmth_label);

    debug!(
        brightness = stats.mean_luma,
        contrast = stats.luma_deviation,
        warmth,
        recommended = recommendations.len(),
        "analysed image"
    );

    AnalysisReport {
        width: buffer.width(),
        height: buffer.height(),
        orientation,
        brightness: stats.mean_luma,
        contrast: stats.luma_deviation,
        warmth,
        brightness_label,
        contrast_label,
        warmth_label,
        recommendations,
    }
}

fn recommend(
    brightness: BrightnessLabel,
    contrast: ContrastLabel,
    warmth: WarmthLabel,
) -> Vec<Recommendation> {
    let mut picks: Vec<(ReshapeKind, &str)> = Vec::new();

    match contrast {
        ContrastLabel::High => picks.push((ReshapeKind::Refinement, "light smoothing to soften harsh texture")),
        ContrastLabel::Flat => picks.push((ReshapeKind::TipReshaping, "extra definition for a flat image")),
        ContrastLabel::Moderate => {}
    }
    match brightness {
        BrightnessLabel::Dark => picks.push((ReshapeKind::BridgeAdjustment, "a bridge highlight lifts a dark image")),
        BrightnessLabel::Bright => picks.push((ReshapeKind::Narrowing, "side shading adds depth to a bright image")),
        BrightnessLabel::Balanced => {}
    }
    if warmth == WarmthLabel::Cool {
        picks.push((ReshapeKind::Straightening, "a slight warm tint balances cool tones"));
    }
    if picks.is_empty() {
        picks.push((ReshapeKind::Refinement, "subtle smoothing that keeps a natural look"));
    }

    picks
        .into_iter()
        .map(|(preset, reason)| Recommendation {
            preset,
            reason: reason.to_string(),
        })
        .collect()
}

struct Stats {
    mean_luma: f64,
    luma_deviation: f64,
    mean_red: f64,
    mean_blue: f64,
}

impl Stats {
    fn collect(buffer: &PixelBuffer) -> Self {
        let mut count = 0usize;
        let (mut sum_luma, mut sum_sq, mut sum_r, mut sum_b) = (0.0, 0.0, 0.0, 0.0);

        for pixel in buffer.pixels() {
            let (r, g, b) = (f64::from(pixel[0]), f64::from(pixel[1]), f64::from(pixel[2]));
            let luma = 0.299 * r + 0.587 * g + 0.114 * b;
            sum_luma += luma;
            sum_sq += luma * luma;
            sum_r += r;
            sum_b += b;
            count += 1;
        }

        if count == 0 {
            return Self {
                mean_luma: 0.0,
                luma_deviation: 0.0,
                mean_red: 0.0,
                mean_blue: 0.0,
            };
        }

        let n = count as f64;
        let mean = sum_luma / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        Self {
            mean_luma: mean,
            luma_deviation: variance.sqrt(),
            mean_red: sum_r / n,
            mean_blue: sum_b / n,
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size: {}x{} ({:?})", self.width, self.height, self.orientation)?;
        writeln!(f, "brightness: {:.1} ({:?})", self.brightness, self.brightness_label)?;
        writeln!(f, "contrast: {:.1} ({:?})", self.contrast, self.contrast_label)?;
        write!(f, "warmth: {:.1} ({:?})", self.warmth, self.warmth_label)?;
        for rec in &self.recommendations {
            write!(f, "\nrecommend {}: {}", rec.preset, rec.reason)?;
        }
        Ok(())
    }
}
