//! Export encoding.
//!
//! This module provides functionality for:
//! - Resolving a (format, compression mode) pair to a concrete encoder
//! - Flattening or rejecting alpha for formats that cannot store it
//! - Encoding PNG, LZW TIFF, JPEG and lossy WebP
//! - Producing a downscaled PNG preview
//!
//! Every entry point borrows the buffer and returns fresh bytes, so a failed
//! export never touches the image being edited.

mod flatten;
mod jpeg;
mod png;
mod policy;
mod tiff;
mod types;
mod webp;

use std::borrow::Cow;

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::transform::{resize_to_fit, ResampleFilter};

pub use flatten::flatten_alpha;
pub use jpeg::encode_jpeg;
pub use png::{encode_png, PngEffort};
pub use policy::{resolve_codec, Codec};
pub use self::tiff::encode_tiff;
pub use types::{
    AlphaPolicy, CompressionMode, ExportError, ExportFormat, ExportOptions, DEFAULT_QUALITY,
};
pub use self::webp::encode_webp;

/// Base name used for suggested export file names.
pub const DEFAULT_FILE_STEM: &str = "converted_image";

/// Suggested file name for an export, e.g. `converted_image.png`.
pub fn default_file_name(format: ExportFormat) -> String {
    format!("{}.{}", DEFAULT_FILE_STEM, format.extension())
}

/// Resolve the channel layout to encode, applying the alpha policy.
fn prepare_channels<'a>(
    image: &'a PixelBuffer,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<Cow<'a, PixelBuffer>, ExportError> {
    if !image.has_alpha() || format.supports_alpha() {
        return Ok(Cow::Borrowed(image));
    }

    match options.alpha_policy {
        AlphaPolicy::Flatten => {
            debug!(%format, background = ?options.background, "flattening alpha");
            Ok(Cow::Owned(flatten_alpha(image, options.background)?))
        }
        AlphaPolicy::Reject => Err(ExportError::UnsupportedChannels {
            format,
            channels: image.channels(),
        }),
    }
}

/// Encode `image` as `format` under `mode`.
///
/// # Errors
///
/// * `UnsupportedCompression` if the pair is outside the compatibility table
/// * `UnsupportedChannels` if the image has alpha, the format cannot store
///   it, and the policy is `Reject`
/// * `EncodingFailed` if the underlying encoder fails
pub fn encode_export(
    image: &PixelBuffer,
    format: ExportFormat,
    mode: CompressionMode,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let codec = resolve_codec(format, mode)?;
    let prepared = prepare_channels(image, format, options)?;

    let bytes = match codec {
        Codec::PngOptimized => encode_png(&prepared, PngEffort::Optimized)?,
        Codec::TiffLzw => encode_tiff(&prepared)?,
        Codec::Jpeg => encode_jpeg(&prepared, options.jpeg_quality)?,
        Codec::WebpLossy => encode_webp(&prepared, options.webp_quality)?,
    };

    debug!(
        %format,
        %mode,
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "encoded export"
    );
    Ok(bytes)
}

/// Encode a PNG preview whose longest edge is at most `max_edge`.
///
/// The image is never upscaled.
///
/// # Errors
///
/// Returns `ExportError::Transform` if `max_edge` is zero.
pub fn encode_preview(
    image: &PixelBuffer,
    max_edge: u32,
    filter: ResampleFilter,
) -> Result<Vec<u8>, ExportError> {
    let scaled = resize_to_fit(image, max_edge, filter)?;
    encode_png(&scaled, PngEffort::Fast)
}
