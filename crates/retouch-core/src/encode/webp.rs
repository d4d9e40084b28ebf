//! Lossy WebP encoding via libwebp.

use super::ExportError;
use crate::buffer::{ChannelLayout, PixelBuffer};

/// Encode a buffer as lossy WebP, keeping alpha if present.
///
/// Quality is clamped to 1-100.
pub fn encode_webp(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, ExportError> {
    let (width, height) = image.dimensions();
    let encoder = match image.layout() {
        ChannelLayout::Rgb => webp::Encoder::from_rgb(image.samples(), width, height),
        ChannelLayout::Rgba => webp::Encoder::from_rgba(image.samples(), width, height),
    };

    let memory = encoder
        .encode_simple(false, quality.clamp(1, 100) as f32)
        .map_err(|e| ExportError::EncodingFailed(format!("WebP: {:?}", e)))?;

    Ok(memory.to_vec())
}
