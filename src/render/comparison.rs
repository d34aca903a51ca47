//! Side-by-side before/after composites.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::{FaceError, Result};
use crate::types::PixelBuffer;

/// Canvas colour behind the two panels.
const CANVAS: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Place `before` and `after` next to each other.
///
/// The output is `2 * (before.width / 2)` wide and `before.height` tall.
/// Each input is scaled to fit its half-width panel with its aspect ratio
/// intact and centred there; nothing is cropped. The result is RGB.
pub fn render_comparison(before: &PixelBuffer, after: &PixelBuffer) -> Result<PixelBuffer> {
    let panel_width = before.width() / 2;
    let height = before.height();
    if panel_width == 0 || height == 0 {
        return Err(FaceError::InvalidImage {
            message: format!(
                "Cannot build a comparison from a {}x{} image",
                before.width(),
                before.height()
            ),
            help: Some("The first image must be at least 2 pixels wide".to_string()),
        });
    }

    let mut canvas = RgbaImage::from_pixel(panel_width * 2, height, CANVAS);
    for (index, source) in [before, after].into_iter().enumerate() {
        let panel = fit_panel(source, panel_width, height)?;
        let left = index as u32 * panel_width + (panel_width - panel.width()) / 2;
        let top = (height - panel.height()) / 2;
        imageops::overlay(&mut canvas, &panel, i64::from(left), i64::from(top));
    }

    let flattened = image::DynamicImage::ImageRgba8(canvas).into_rgb8();
    PixelBuffer::new(flattened.into_raw(), panel_width * 2, height, 3)
}

/// Scale `source` to fit within `width` x `height`, preserving aspect ratio.
fn fit_panel(source: &PixelBuffer, width: u32, height: u32) -> Result<RgbaImage> {
    if source.width() == 0 || source.height() == 0 {
        return Err(FaceError::invalid_image("Cannot compare an empty image"));
    }
    let image = source.to_dynamic()?;
    let fitted = if image.width() == width && image.height() == height {
        image
    } else {
        image.resize(width, height, FilterType::Triangle)
    };
    Ok(fitted.into_rgba8())
}
