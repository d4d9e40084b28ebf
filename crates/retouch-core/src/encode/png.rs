//! PNG encoding.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::ExportError;
use crate::buffer::{ChannelLayout, PixelBuffer};

/// PNG encoder effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngEffort {
    /// Fast compression, used for previews.
    Fast,
    /// Maximum compression with adaptive row filtering, used for export.
    Optimized,
}

fn color_type(layout: ChannelLayout) -> ExtendedColorType {
    match layout {
        ChannelLayout::Rgb => ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => ExtendedColorType::Rgba8,
    }
}

/// Encode a buffer to PNG, keeping alpha if present.
pub fn encode_png(image: &PixelBuffer, effort: PngEffort) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = match effort {
        PngEffort::Fast => {
            PngEncoder::new_with_quality(&mut buffer, CompressionType::Fast, FilterType::Sub)
        }
        PngEffort::Optimized => {
            PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive)
        }
    };

    encoder
        .write_image(
            image.samples(),
            image.width(),
            image.height(),
            color_type(image.layout()),
        )
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_support::gradient;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_png_signature() {
        let bytes = encode_png(&gradient(20, 10), PngEffort::Optimized).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_png_is_lossless() {
        let img = gradient(17, 9);
        for effort in [PngEffort::Fast, PngEffort::Optimized] {
            let bytes = encode_png(&img, effort).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap().into_rgb8();
            assert_eq!(decoded.as_raw().as_slice(), img.samples());
        }
    }

    #[test]
    fn test_png_keeps_alpha() {
        let img = gradient(8, 8).with_alpha();
        let bytes = encode_png(&img, PngEffort::Optimized).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(decoded.color().has_alpha());
    }
}
