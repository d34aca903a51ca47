//! Image decoding and atomic encoding.
//!
//! Decoding normalises every supported format to 8-bit RGB or RGBA. Encoding
//! writes to a temporary file next to the destination and renames it into
//! place only once the encoder has finished, so a failed write never leaves
//! a partial file at the destination path.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FaceError, Result};
use crate::types::PixelBuffer;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 95;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// JPEG quality, 1..=100. Ignored by lossless formats.
    pub quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Decode an image file into a pixel buffer.
pub fn decode(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path).map_err(|e| FaceError::InvalidImage {
        message: format!("Failed to decode {}: {}", path.display(), e),
        help: None,
    })?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "decoded image");
    Ok(PixelBuffer::from_dynamic(image))
}

/// Decode an in-memory image.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory(bytes).map_err(|e| FaceError::InvalidImage {
        message: format!("Failed to decode image data: {}", e),
        help: None,
    })?;
    Ok(PixelBuffer::from_dynamic(image))
}

/// Encode `buffer` to `path`, choosing the format from the extension.
///
/// The data goes to a temporary file in the destination directory, is
/// flushed and synced, then renamed over `path`. On any error the temporary
/// file is removed and `path` is untouched.
pub fn encode(buffer: &PixelBuffer, path: &Path, options: EncodeOptions) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(|_| FaceError::Io {
        path: path.to_path_buf(),
        message: "Unsupported output format".to_string(),
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| io_error(dir, "Failed to create output directory", e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".facetone-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| io_error(dir, "Failed to create temporary file", e))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_image(buffer, &mut writer, format, options).map_err(|message| FaceError::Io {
            path: path.to_path_buf(),
            message,
        })?;
        writer
            .flush()
            .map_err(|e| io_error(path, "Failed to flush output", e))?;
    }
    temp.as_file()
        .sync_all()
        .map_err(|e| io_error(path, "Failed to sync output", e))?;

    temp.persist(path)
        .map_err(|e| io_error(path, "Failed to move output into place", e.error))?;

    debug!(path = %path.display(), ?format, "encoded image");
    Ok(())
}

fn write_image<W: Write + std::io::Seek>(
    buffer: &PixelBuffer,
    writer: &mut W,
    format: ImageFormat,
    options: EncodeOptions,
) -> std::result::Result<(), String> {
    let image = buffer.to_dynamic().map_err(|e| e.to_string())?;
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgb8(image.into_rgb8());
            let quality = options.quality.clamp(1, 100);
            let encoder = JpegEncoder::new_with_quality(writer, quality);
            rgb.write_with_encoder(encoder)
                .map_err(|e| format!("Failed to encode JPEG: {}", e))
        }
        other => image
            .write_to(writer, other)
            .map_err(|e| format!("Failed to encode {:?}: {}", other, e)),
    }
}

fn io_error(path: &Path, context: &str, error: std::io::Error) -> FaceError {
    FaceError::Io {
        path: path.to_path_buf(),
        message: format!("{}: {}", context, error),
    }
}
