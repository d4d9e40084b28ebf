//! In-memory raster representation shared by every editing operation.
//!
//! A [`PixelBuffer`] is immutable once built: operations read from one buffer
//! and return a freshly allocated one. This is what keeps undo snapshots
//! independent of the current image.

use image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing or reading a [`PixelBuffer`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// Pixel coordinates fall outside the image.
    #[error("Pixel ({x}, {y}) is outside a {width}x{height} image")]
    OutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    ZeroDimensions { width: u32, height: u32 },

    /// Sample array length doesn't match width * height * channels.
    #[error("Invalid sample data: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelLayout {
    /// Three samples per pixel: red, green, blue.
    #[default]
    Rgb,
    /// Four samples per pixel: red, green, blue, alpha.
    Rgba,
}

impl ChannelLayout {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// A decoded image with 8-bit samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating dimensions and sample length.
    pub fn new(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        samples: Vec<u8>,
    ) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimensions { width, height });
        }

        let expected = (width as usize) * (height as usize) * layout.channels();
        if samples.len() != expected {
            return Err(BufferError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Create a 3-channel buffer from RGB samples.
    pub fn from_rgb(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, BufferError> {
        Self::new(width, height, ChannelLayout::Rgb, samples)
    }

    /// Create a 4-channel buffer from RGBA samples.
    pub fn from_rgba(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, BufferError> {
        Self::new(width, height, ChannelLayout::Rgba, samples)
    }

    /// Build a buffer from an image crate image.
    ///
    /// RGBA images keep their alpha channel; every other color type is
    /// converted to RGB8.
    pub fn from_dynamic_image(img: DynamicImage) -> Result<Self, BufferError> {
        match img {
            DynamicImage::ImageRgba8(rgba) => {
                let (width, height) = rgba.dimensions();
                Self::from_rgba(width, height, rgba.into_raw())
            }
            other => {
                let rgb = other.into_rgb8();
                let (width, height) = rgb.dimensions();
                Self::from_rgb(width, height, rgb.into_raw())
            }
        }
    }

    /// Convert to an image crate image for resampling or encoding.
    ///
    /// This clones the sample data.
    pub fn to_dynamic_image(&self) -> Result<DynamicImage, BufferError> {
        let samples = self.samples.clone();
        let converted = match self.layout {
            ChannelLayout::Rgb => {
                RgbImage::from_raw(self.width, self.height, samples).map(DynamicImage::ImageRgb8)
            }
            ChannelLayout::Rgba => {
                RgbaImage::from_raw(self.width, self.height, samples).map(DynamicImage::ImageRgba8)
            }
        };
        converted.ok_or(BufferError::SizeMismatch {
            expected: self.pixel_count() as usize * self.channels(),
            actual: self.samples.len(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Samples per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn has_alpha(&self) -> bool {
        self.layout == ChannelLayout::Rgba
    }

    /// Raw samples in row-major order.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the sample array in bytes.
    pub fn byte_size(&self) -> usize {
        self.samples.len()
    }

    /// Read the samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<&[u8], BufferError> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let channels = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        Ok(&self.samples[start..start + channels])
    }

    /// Return a 4-channel copy with alpha initialized to fully opaque.
    ///
    /// A buffer that already has alpha is returned as an equal copy.
    pub fn with_alpha(&self) -> PixelBuffer {
        if self.has_alpha() {
            return self.clone();
        }

        let mut samples = Vec::with_capacity(self.pixel_count() as usize * 4);
        for rgb in self.samples.chunks_exact(3) {
            samples.extend_from_slice(rgb);
            samples.push(255);
        }

        PixelBuffer {
            width: self.width,
            height: self.height,
            layout: ChannelLayout::Rgba,
            samples,
        }
    }

    /// Return a 3-channel copy with the alpha channel dropped.
    ///
    /// A buffer without alpha is returned as an equal copy.
    pub fn without_alpha(&self) -> PixelBuffer {
        if !self.has_alpha() {
            return self.clone();
        }

        let mut samples = Vec::with_capacity(self.pixel_count() as usize * 3);
        for rgba in self.samples.chunks_exact(4) {
            samples.extend_from_slice(&rgba[..3]);
        }

        PixelBuffer {
            width: self.width,
            height: self.height,
            layout: ChannelLayout::Rgb,
            samples,
        }
    }

    /// Build a buffer with the same shape as `self` from new samples.
    ///
    /// Used by per-pixel filters, whose output length always matches.
    pub(crate) fn with_samples(&self, samples: Vec<u8>) -> PixelBuffer {
        debug_assert_eq!(samples.len(), self.samples.len(), "Sample count mismatch");
        PixelBuffer {
            width: self.width,
            height: self.height,
            layout: self.layout,
            samples,
        }
    }
}
