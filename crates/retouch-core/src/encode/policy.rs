//! Format/compression compatibility table.
//!
//! | format   | lossless            | lossy          |
//! |----------|---------------------|----------------|
//! | png      | optimized PNG       | rejected       |
//! | tiff     | LZW TIFF            | rejected       |
//! | jpg/jpeg | rejected            | JPEG, q85      |
//! | webp     | rejected            | lossy WebP, q85|
//! | bmp      | rejected            | rejected       |

use super::{CompressionMode, ExportError, ExportFormat};

/// Concrete encoder chosen for a (format, mode) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// PNG with maximum compression and adaptive row filtering.
    PngOptimized,
    /// TIFF with LZW compression.
    TiffLzw,
    /// Baseline JPEG.
    Jpeg,
    /// Lossy WebP.
    WebpLossy,
}

/// Look up the encoder for `format` under `mode`.
///
/// # Errors
/// Returns `ExportError::UnsupportedCompression` for pairs outside the table.
pub fn resolve_codec(format: ExportFormat, mode: CompressionMode) -> Result<Codec, ExportError> {
    use CompressionMode::{Lossless, Lossy};

    match (format, mode) {
        (ExportFormat::Png, Lossless) => Ok(Codec::PngOptimized),
        (ExportFormat::Tiff, Lossless) => Ok(Codec::TiffLzw),
        (ExportFormat::Jpg | ExportFormat::Jpeg, Lossy) => Ok(Codec::Jpeg),
        (ExportFormat::Webp, Lossy) => Ok(Codec::WebpLossy),
        _ => Err(ExportError::UnsupportedCompression { format, mode }),
    }
}
