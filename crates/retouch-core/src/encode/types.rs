//! Core types for export encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::BufferError;
use crate::transform::TransformError;
use crate::ParseNameError;

/// Target container format.
///
/// `Jpg` and `Jpeg` are both accepted so the chosen spelling survives into
/// the suggested file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Png,
    Jpg,
    Jpeg,
    Tiff,
    Webp,
    Bmp,
}

impl ExportFormat {
    /// Every format, in menu order.
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Png,
        ExportFormat::Jpg,
        ExportFormat::Jpeg,
        ExportFormat::Tiff,
        ExportFormat::Webp,
        ExportFormat::Bmp,
    ];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Tiff => "tiff",
            ExportFormat::Webp => "webp",
            ExportFormat::Bmp => "bmp",
        }
    }

    /// Whether the container can carry an alpha channel as exported here.
    pub fn supports_alpha(self) -> bool {
        matches!(
            self,
            ExportFormat::Png | ExportFormat::Tiff | ExportFormat::Webp
        )
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('.');
        if wanted.eq_ignore_ascii_case("tif") {
            return Ok(ExportFormat::Tiff);
        }
        ExportFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseNameError::new("export format", s))
    }
}

/// Compression policy requested for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMode {
    Lossless,
    Lossy,
}

impl CompressionMode {
    pub fn name(self) -> &'static str {
        match self {
            CompressionMode::Lossless => "lossless",
            CompressionMode::Lossy => "lossy",
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lossless" => Ok(CompressionMode::Lossless),
            "lossy" => Ok(CompressionMode::Lossy),
            _ => Err(ParseNameError::new("compression mode", s)),
        }
    }
}

/// What to do with an alpha channel when the target format has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaPolicy {
    /// Composite over the opaque background color.
    #[default]
    Flatten,
    /// Fail with `ExportError::UnsupportedChannels`.
    Reject,
}

/// Default quality for lossy encoders.
pub const DEFAULT_QUALITY: u8 = 85;

/// Encoder parameters resolved from the editor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// WebP quality (1-100).
    pub webp_quality: u8,
    pub alpha_policy: AlphaPolicy,
    /// Opaque RGB color used when flattening alpha.
    pub background: [u8; 3],
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_QUALITY,
            webp_quality: DEFAULT_QUALITY,
            alpha_policy: AlphaPolicy::Flatten,
            background: [255, 255, 255],
        }
    }
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export or preview requested before an image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// The (format, mode) pair is not in the compatibility table.
    #[error("{mode} compression is not supported for {format}")]
    UnsupportedCompression {
        format: ExportFormat,
        mode: CompressionMode,
    },

    /// The image has alpha, the format cannot store it, and flattening is disabled.
    #[error("{format} cannot store {channels}-channel images")]
    UnsupportedChannels { format: ExportFormat, channels: usize },

    /// The underlying encoder failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing to the caller's sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}
