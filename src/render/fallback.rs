//! Fixed ellipse overlay used when detection finds nothing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FaceError, Result};
use crate::types::{EffectOptions, PixelBuffer};

/// Placement and strength of the fallback ellipse, as fractions of the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Alpha reached at intensity 100.
    pub max_alpha: u8,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.7,
            radius_x: 0.08,
            radius_y: 0.02,
            max_alpha: 255,
        }
    }
}

/// The ellipse resolved to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipse {
    pub cx: u32,
    pub cy: u32,
    pub rx: u32,
    pub ry: u32,
}

impl Ellipse {
    /// Whether the pixel at `(x, y)` lies inside. A zero radius contains nothing.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if self.rx == 0 || self.ry == 0 {
            return false;
        }
        let dx = (f64::from(x) - f64::from(self.cx)) / f64::from(self.rx);
        let dy = (f64::from(y) - f64::from(self.cy)) / f64::from(self.ry);
        dx * dx + dy * dy <= 1.0
    }
}

impl OverlayConfig {
    pub fn ellipse(&self, width: u32, height: u32) -> Ellipse {
        let scale = |fraction: f64, size: u32| (f64::from(size) * fraction).floor().max(0.0) as u32;
        Ellipse {
            cx: scale(self.center_x, width),
            cy: scale(self.center_y, height),
            rx: scale(self.radius_x, width),
            ry: scale(self.radius_y, height),
        }
    }

    /// Overlay opacity in `[0, 1]`: `floor(strength * max_alpha) / 255`.
    pub fn opacity(&self, options: &EffectOptions) -> f64 {
        let alpha = (options.strength() * f64::from(self.max_alpha)).floor();
        alpha / 255.0
    }

    /// Reject anchors and radii that are not finite fractions in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("center_x", self.center_x),
            ("center_y", self.center_y),
            ("radius_x", self.radius_x),
            ("radius_y", self.radius_y),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(FaceError::Validation {
                    message: format!("overlay.{} must be between 0 and 1, got {}", name, value),
                    help: Some("Overlay placement is a fraction of the image size".to_string()),
                });
            }
        }
        Ok(())
    }
}

/// Multiply-blend the target colour through an ellipse onto a copy of `buffer`.
///
/// `out = base * (1 - a) + (base * colour / 255) * a`, alpha untouched.
/// Output dimensions always match the input.
pub fn render_fallback(
    buffer: &PixelBuffer,
    options: &EffectOptions,
    config: &OverlayConfig,
) -> PixelBuffer {
    let mut output = buffer.clone();
    let ellipse = config.ellipse(buffer.width(), buffer.height());
    let opacity = config.opacity(options);
    let colour = options.colour.to_array();
    debug!(?ellipse, opacity, "rendering fallback overlay");

    if opacity == 0.0 || buffer.width() == 0 || buffer.height() == 0 {
        return output;
    }

    // Only pixels inside the image are visited, whatever the radii.
    let (max_x, max_y) = (buffer.width() - 1, buffer.height() - 1);
    let y_range = ellipse.cy.saturating_sub(ellipse.ry).min(max_y)
        ..=ellipse.cy.saturating_add(ellipse.ry).min(max_y);
    let x_range = ellipse.cx.saturating_sub(ellipse.rx).min(max_x)
        ..=ellipse.cx.saturating_add(ellipse.rx).min(max_x);

    for y in y_range {
        for x in x_range.clone() {
            if !ellipse.contains(x, y) {
                continue;
            }
            let Some(pixel) = output.pixel_mut(x, y) else {
                continue;
            };
            for (channel, &tint) in pixel.iter_mut().zip(colour.iter()) {
                let base = f64::from(*channel);
                let multiplied = base * f64::from(tint) / 255.0;
                let mixed = base * (1.0 - opacity) + multiplied * opacity;
                *channel = mixed.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    output
}
