//! Pixel implementations of filter steps.

use palette::{IntoColor, LabHue, Lch, Srgb};
use tracing::debug;

use crate::error::Result;
use crate::types::PixelBuffer;

use super::chain::{FilterChain, FilterStep};

/// Detail magnitude at or below which the flat sharpen gain applies.
pub const FLAT_THRESHOLD: f64 = 2.0;

/// Run every step of `chain` in order, returning a new buffer.
pub fn apply_filter_chain(buffer: &PixelBuffer, chain: FilterChain) -> Result<PixelBuffer> {
    let mut current = buffer.clone();
    for step in chain {
        debug!(%step, "applying filter step");
        current = apply_step(&current, &step)?;
    }
    Ok(current)
}

/// Apply a single step.
pub fn apply_step(buffer: &PixelBuffer, step: &FilterStep) -> Result<PixelBuffer> {
    match *step {
        FilterStep::Blur { sigma } => blur(buffer, sigma),
        FilterStep::Sharpen {
            sigma,
            flat,
            jagged,
        } => sharpen(buffer, sigma, flat, jagged),
        FilterStep::Modulate {
            brightness,
            saturation,
            hue,
        } => Ok(modulate(buffer, brightness, saturation, hue)),
        FilterStep::LinearContrast { slope, intercept } => Ok(linear(buffer, slope, intercept)),
    }
}

/// Gaussian blur over all channels. A non-positive sigma is a no-op.
pub fn blur(buffer: &PixelBuffer, sigma: f64) -> Result<PixelBuffer> {
    if sigma <= 0.0 {
        return Ok(buffer.clone());
    }
    let blurred = buffer.to_dynamic()?.blur(sigma as f32);
    Ok(PixelBuffer::from_dynamic(blurred))
}

/// Unsharp mask on colour channels.
///
/// Detail at or below [`FLAT_THRESHOLD`] is scaled by `flat`, stronger detail
/// by `jagged`. A non-positive sigma is a no-op.
pub fn sharpen(buffer: &PixelBuffer, sigma: f64, flat: f64, jagged: f64) -> Result<PixelBuffer> {
    if sigma <= 0.0 {
        return Ok(buffer.clone());
    }
    let blurred = blur(buffer, sigma)?;
    let mut output = buffer.clone();

    for (pixel, soft) in output.pixels_mut().zip(blurred.pixels()) {
        for (channel, &smooth) in pixel.iter_mut().take(3).zip(soft.iter()) {
            let original = f64::from(*channel);
            let detail = original - f64::from(smooth);
            let gain = if detail.abs() <= FLAT_THRESHOLD { flat } else { jagged };
            *channel = clamp_channel(original + gain * detail);
        }
    }
    Ok(output)
}

/// Scale lightness and chroma and rotate hue in LCh space.
pub fn modulate(buffer: &PixelBuffer, brightness: f64, saturation: f64, hue: f64) -> PixelBuffer {
    let mut output = buffer.clone();
    if brightness == 1.0 && saturation == 1.0 && hue == 0.0 {
        return output;
    }

    for pixel in output.pixels_mut() {
        let rgb = Srgb::new(
            f32::from(pixel[0]) / 255.0,
            f32::from(pixel[1]) / 255.0,
            f32::from(pixel[2]) / 255.0,
        );
        let mut lch: Lch = rgb.into_color();
        lch.l *= brightness as f32;
        lch.chroma *= saturation as f32;
        lch.hue = LabHue::from_degrees(lch.hue.into_degrees() + hue as f32);

        let out: Srgb = lch.into_color();
        pixel[0] = clamp_channel(f64::from(out.red) * 255.0);
        pixel[1] = clamp_channel(f64::from(out.green) * 255.0);
        pixel[2] = clamp_channel(f64::from(out.blue) * 255.0);
    }
    output
}

/// `slope * v + intercept` on colour channels.
pub fn linear(buffer: &PixelBuffer, slope: f64, intercept: f64) -> PixelBuffer {
    let mut output = buffer.clone();
    for pixel in output.pixels_mut() {
        for channel in pixel.iter_mut().take(3) {
            *channel = clamp_channel(slope * f64::from(*channel) + intercept);
        }
    }
    output
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
