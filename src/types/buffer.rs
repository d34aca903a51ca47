//! Raw pixel buffers.
//!
//! A `PixelBuffer` is the only currency passed between the detection,
//! compositing and filter stages. Its byte length always equals
//! `width * height * channels`.

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::error::{FaceError, Result};

/// Channel layout of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    /// Bytes per pixel.
    pub const fn count(self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    /// Map a raw channel count to a layout.
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(FaceError::InvalidImage {
                message: format!("Unsupported channel count: {}", other),
                help: Some("Buffers must be RGB (3) or RGBA (4)".to_string()),
            }),
        }
    }

    /// Whether the layout carries an alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }
}

/// Row-major 8-bit image data with fixed dimensions and channel layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: Channels,
}

impl PixelBuffer {
    /// Wrap raw bytes, rejecting any length that does not match the metadata.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: usize) -> Result<Self> {
        let channels = Channels::from_count(channels)?;
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(FaceError::InvalidImage {
                message: format!(
                    "Buffer holds {} bytes but {}x{}x{} needs {}",
                    data.len(),
                    width,
                    height,
                    channels.count(),
                    expected
                ),
                help: None,
            });
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// A buffer filled with a single colour.
    ///
    /// `pixel` must hold exactly one value per channel.
    pub fn filled(width: u32, height: u32, channels: Channels, pixel: &[u8]) -> Result<Self> {
        if pixel.len() != channels.count() {
            return Err(FaceError::InvalidImage {
                message: format!(
                    "Fill pixel has {} values but the buffer has {} channels",
                    pixel.len(),
                    channels.count()
                ),
                help: None,
            });
        }
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * channels.count())
            .collect();

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Bytes per pixel.
    pub fn channel_count(&self) -> usize {
        self.channels.count()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels.count())
    }

    /// The RGB components of the pixel at `(x, y)`.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let i = self.offset(x, y)?;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Mutable view of the pixel at `(x, y)`, alpha included.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let i = self.offset(x, y)?;
        let n = self.channels.count();
        Some(&mut self.data[i..i + n])
    }

    /// Iterate over pixels as channel slices, row-major.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels.count())
    }

    /// Mutable pixel iterator, row-major.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let n = self.channels.count();
        self.data.chunks_exact_mut(n)
    }

    /// Convert into an `image` crate buffer, keeping the channel layout.
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let data = self.data.clone();
        let image = match self.channels {
            Channels::Rgb => RgbImage::from_raw(self.width, self.height, data)
                .map(DynamicImage::ImageRgb8),
            Channels::Rgba => RgbaImage::from_raw(self.width, self.height, data)
                .map(DynamicImage::ImageRgba8),
        };

        image.ok_or_else(|| FaceError::invalid_image("Buffer does not match its dimensions"))
    }

    /// Take pixels from a decoded image, normalising to 8-bit RGB or RGBA.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        if image.color().has_alpha() {
            Self {
                data: image.into_rgba8().into_raw(),
                width,
                height,
                channels: Channels::Rgba,
            }
        } else {
            Self {
                data: image.into_rgb8().into_raw(),
                width,
                height,
                channels: Channels::Rgb,
            }
        }
    }
}
