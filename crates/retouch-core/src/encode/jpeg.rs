//! JPEG encoding for export.
//!
//! Uses the `image` crate's baseline encoder. That encoder has no separate
//! "optimize" pass, so quality is the only tuning knob exposed here.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{ExportError, ExportFormat};
use crate::buffer::PixelBuffer;

/// Encode an RGB buffer to JPEG bytes.
///
/// Quality is clamped to 1-100.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses (editor default: 85)
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
///
/// # Errors
///
/// Returns `ExportError::UnsupportedChannels` if the buffer carries alpha;
/// callers flatten first.
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, ExportError> {
    if image.has_alpha() {
        return Err(ExportError::UnsupportedChannels {
            format: ExportFormat::Jpeg,
            channels: image.channels(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(
            image.samples(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::{gradient, solid};

    #[test]
    fn test_encode_jpeg_basic() {
        let jpeg_bytes = encode_jpeg(&solid(100, 100, [128, 128, 128]), 90).unwrap();

        // SOI marker
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);

        // EOI marker
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let img = solid(10, 10, [128, 128, 128]);
        assert!(encode_jpeg(&img, 0).is_ok());
        assert!(encode_jpeg(&img, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_rejects_alpha() {
        let img = solid(4, 4, [1, 2, 3]).with_alpha();
        assert!(matches!(
            encode_jpeg(&img, 85),
            Err(ExportError::UnsupportedChannels { channels: 4, .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_single_pixel() {
        let jpeg_bytes = encode_jpeg(&solid(1, 1, [255, 0, 0]), 90).unwrap();
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_jpeg_gradient_size() {
        let jpeg_bytes = encode_jpeg(&gradient(100, 100), 90).unwrap();
        assert!(jpeg_bytes.len() > 500);
        assert!(jpeg_bytes.len() < 50000);
    }

    #[test]
    fn test_encode_jpeg_decodes_back() {
        let jpeg_bytes = encode_jpeg(&gradient(32, 16), 85).unwrap();
        let decoded = image::load_from_memory(&jpeg_bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
