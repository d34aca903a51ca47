//! Colour blending at detected pixels.

use tracing::debug;

use crate::detect::CandidatePixel;
use crate::types::{EffectOptions, PixelBuffer};

/// Blend `original` toward `target` by `factor`, rounding and clamping.
pub fn blend_channel(original: u8, target: u8, factor: f64) -> u8 {
    let mixed = f64::from(original) * (1.0 - factor) + f64::from(target) * factor;
    mixed.round().clamp(0.0, 255.0) as u8
}

/// Texture-adjusted blend factor for one candidate.
pub fn blend_factor(options: &EffectOptions, confidence: f64) -> f64 {
    let raw = options.strength() * confidence.clamp(0.0, 1.0);
    options.texture.adjust(raw)
}

/// Blend the target colour into every candidate pixel.
///
/// Candidates outside the buffer are skipped. Alpha is left alone. With an
/// intensity of zero the effect is disabled and the copy is returned as is.
pub fn apply_color(
    buffer: &PixelBuffer,
    candidates: &[CandidatePixel],
    options: &EffectOptions,
) -> PixelBuffer {
    let mut output = buffer.clone();
    if options.intensity == 0 {
        return output;
    }

    let target = options.colour.to_array();
    let mut skipped = 0usize;

    for candidate in candidates {
        let factor = blend_factor(options, candidate.confidence);
        let Some(pixel) = output.pixel_mut(candidate.x, candidate.y) else {
            skipped += 1;
            continue;
        };
        for (channel, &goal) in pixel.iter_mut().zip(target.iter()) {
            *channel = blend_channel(*channel, goal, factor);
        }
    }

    debug!(
        blended = candidates.len() - skipped,
        skipped,
        texture = %options.texture,
        "applied lip colour"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channels, Colour, Texture};

    fn options(intensity: u8, texture: Texture) -> EffectOptions {
        EffectOptions::new(Colour::rgb(200, 20, 60), intensity, texture).unwrap()
    }

    fn candidate(x: u32, y: u32, confidence: f64) -> CandidatePixel {
        CandidatePixel { x, y, confidence }
    }

    #[test]
    fn test_blend_channel_endpoints() {
        assert_eq!(blend_channel(10, 250, 0.0), 10);
        assert_eq!(blend_channel(10, 250, 1.0), 250);
        assert_eq!(blend_channel(100, 200, 0.5), 150);
        // 100 * 0.75 + 201 * 0.25 = 125.25
        assert_eq!(blend_channel(100, 201, 0.25), 125);
    }

    #[test]
    fn test_blend_channel_stays_in_range() {
        for original in [0u8, 1, 127, 254, 255] {
            for target in [0u8, 1, 128, 255] {
                for intensity in 0..=100u8 {
                    for confidence in [0.0, 0.25, 0.5, 0.99, 1.0] {
                        for texture in Texture::ALL {
                            let opts = EffectOptions::new(
                                Colour::rgb(target, target, target),
                                intensity,
                                texture,
                            )
                            .unwrap();
                            let factor = blend_factor(&opts, confidence);
                            assert!((0.0..=1.0).contains(&factor));
                            let out = blend_channel(original, target, factor);
                            assert!(out >= original.min(target) && out <= original.max(target));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_intensity_is_identity() {
        let buffer = PixelBuffer::filled(4, 4, Channels::Rgb, &[90, 40, 50]).unwrap();
        let candidates = vec![candidate(1, 1, 1.0), candidate(2, 2, 0.8)];
        for texture in Texture::ALL {
            let out = apply_color(&buffer, &candidates, &options(0, texture));
            assert_eq!(out, buffer);
        }
    }

    #[test]
    fn test_satin_full_intensity_full_confidence_replaces_colour() {
        let buffer = PixelBuffer::filled(3, 3, Channels::Rgb, &[90, 40, 50]).unwrap();
        let out = apply_color(&buffer, &[candidate(1, 1, 1.0)], &options(100, Texture::Satin));
        assert_eq!(out.rgb_at(1, 1), Some([200, 20, 60]));
        assert_eq!(out.rgb_at(0, 0), Some([90, 40, 50]));
    }

    #[test]
    fn test_matte_caps_blend() {
        let opts = options(100, Texture::Matte);
        assert!((blend_factor(&opts, 1.0) - 0.9).abs() < 1e-12);
        let buffer = PixelBuffer::filled(1, 1, Channels::Rgb, &[0, 0, 0]).unwrap();
        let out = apply_color(&buffer, &[candidate(0, 0, 1.0)], &opts);
        // 200 * 0.9 = 180, 20 * 0.9 = 18, 60 * 0.9 = 54
        assert_eq!(out.rgb_at(0, 0), Some([180, 18, 54]));
    }

    #[test]
    fn test_gloss_has_floor() {
        let opts = options(10, Texture::Gloss);
        assert_eq!(blend_factor(&opts, 0.6), 0.3);
    }

    #[test]
    fn test_metallic_caps_blend() {
        let opts = options(90, Texture::Metallic);
        assert_eq!(blend_factor(&opts, 1.0), 0.8);
    }

    #[test]
    fn test_out_of_bounds_candidates_are_skipped() {
        let buffer = PixelBuffer::filled(2, 2, Channels::Rgb, &[10, 10, 10]).unwrap();
        let candidates = vec![candidate(5, 0, 1.0), candidate(0, 9, 1.0)];
        let out = apply_color(&buffer, &candidates, &options(100, Texture::Satin));
        assert_eq!(out, buffer);
    }

    #[test]
    fn test_alpha_untouched() {
        let buffer = PixelBuffer::filled(2, 1, Channels::Rgba, &[10, 10, 10, 77]).unwrap();
        let out = apply_color(&buffer, &[candidate(0, 0, 1.0)], &options(100, Texture::Satin));
        assert_eq!(out.as_bytes()[..4], [200, 20, 60, 77]);
        assert_eq!(out.as_bytes()[4..], [10, 10, 10, 77]);
    }
}
