//! Colour-and-position lip detection.
//!
//! Each pixel of the scan box is scored by two additive rule sets: colour
//! (redness, saturation, brightness) and position (closeness to the vertical
//! centre line and to the expected mouth line). The sum is capped at 1.0.

use tracing::debug;

use crate::error::{FaceError, Result};
use crate::types::PixelBuffer;

use super::config::{DetectionConfig, PixelRect, ScoreTable};

/// A pixel judged likely to belong to the target feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePixel {
    pub x: u32,
    pub y: u32,
    /// Score in `[0, 1]`.
    pub confidence: f64,
}

/// Colour rule score for an RGB triple.
pub fn colour_score([r, g, b]: [u8; 3], table: &ScoreTable) -> f64 {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let reddish = r > g && r > b;
    let red_dominance = r / g.max(b).max(1.0);
    let saturation = (max - min) / max.max(1.0);
    let brightness = (r + g + b) / (3.0 * 255.0);

    let mut score = 0.0;
    if reddish && red_dominance > table.red_dominance_min {
        score += table.red_score;
    }
    if saturation > table.saturation_min && saturation < table.saturation_max {
        score += table.saturation_score;
    }
    if brightness > table.brightness_min && brightness < table.brightness_max {
        score += table.brightness_score;
    }
    score
}

/// Position rule score for a pixel in a `width` x `height` image.
pub fn position_score(x: u32, y: u32, width: u32, height: u32, table: &ScoreTable) -> f64 {
    let (x, y) = (f64::from(x), f64::from(y));
    let (width, height) = (f64::from(width), f64::from(height));

    let center_x = width / 2.0;
    let anchor = height * table.anchor_y;
    let from_center = (x - center_x).abs() / (width / 2.0);
    let from_anchor = (y - anchor).abs() / (height * table.anchor_spread);

    let mut score = 0.0;
    if from_center < table.center_band {
        score += table.center_score;
    }
    if from_anchor < table.anchor_band {
        score += table.anchor_score;
    }
    score
}

/// Combined, capped confidence for one pixel.
pub fn confidence(rgb: [u8; 3], x: u32, y: u32, width: u32, height: u32, table: &ScoreTable) -> f64 {
    (colour_score(rgb, table) + position_score(x, y, width, height, table)).min(1.0)
}

/// Resolve the scan box and enforce the area limit without touching pixel data.
pub fn scan_rect(width: u32, height: u32, config: &DetectionConfig) -> Result<PixelRect> {
    let rect = config.region.resolve(width, height)?;
    let area = rect.area();
    if area > config.max_scan_area {
        return Err(FaceError::RegionTooLarge {
            area,
            limit: config.max_scan_area,
        });
    }
    Ok(rect)
}

/// Scan the configured region of `buffer` for lip-coloured pixels.
///
/// Returns candidates above `accept_threshold`, highest confidence first.
/// Equal confidences keep row-major scan order. An empty result is not an
/// error; it means no pixel qualified.
pub fn detect_region(buffer: &PixelBuffer, config: &DetectionConfig) -> Result<Vec<CandidatePixel>> {
    config.validate()?;
    let (width, height) = (buffer.width(), buffer.height());
    let rect = scan_rect(width, height, config)?;
    debug!(
        x = ?(rect.x_start..rect.x_end),
        y = ?(rect.y_start..rect.y_end),
        "scanning lip region"
    );

    let mut scanned = Vec::new();
    for y in rect.y_start..rect.y_end {
        for x in rect.x_start..rect.x_end {
            let Some(rgb) = buffer.rgb_at(x, y) else {
                continue;
            };
            let score = confidence(rgb, x, y, width, height, &config.scores);
            if score > config.scan_threshold {
                scanned.push(CandidatePixel {
                    x,
                    y,
                    confidence: score,
                });
            }
        }
    }

    let mut accepted: Vec<CandidatePixel> = scanned
        .into_iter()
        .filter(|p| p.confidence > config.accept_threshold)
        .collect();
    accepted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    debug!(candidates = accepted.len(), "lip scan finished");
    Ok(accepted)
}
