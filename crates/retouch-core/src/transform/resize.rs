//! Image resampling.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `PixelBuffer` instances without modifying the
//! input, and keep the input's channel layout.

use serde::{Deserialize, Serialize};

use super::TransformError;
use crate::buffer::PixelBuffer;

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Parse a user-entered dimension.
///
/// Empty or whitespace-only input means "keep the current size" and yields
/// `None`.
///
/// # Errors
///
/// Returns `TransformError::InvalidArgument` for non-numeric, zero or
/// negative input.
pub fn parse_dimension(text: &str) -> Result<Option<u32>, TransformError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value).map(Some).map_err(|_| {
            TransformError::InvalidArgument(format!("dimension '{}' is too large", trimmed))
        }),
        Ok(_) => Err(TransformError::InvalidArgument(format!(
            "dimension '{}' must be positive",
            trimmed
        ))),
        Err(_) => Err(TransformError::InvalidArgument(format!(
            "dimension '{}' is not a whole number",
            trimmed
        ))),
    }
}

/// Resolve optional target dimensions against the current size.
///
/// # Errors
///
/// Returns `TransformError::InvalidArgument` if a supplied dimension is zero.
pub fn target_dimensions(
    image: &PixelBuffer,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<(u32, u32), TransformError> {
    let width = width.unwrap_or(image.width());
    let height = height.unwrap_or(image.height());
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidArgument(format!(
            "target size {}x{} must be non-zero",
            width, height
        )));
    }
    Ok((width, height))
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `TransformError::InvalidArgument` if either dimension is zero.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<PixelBuffer, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidArgument(format!(
            "target size {}x{} must be non-zero",
            width, height
        )));
    }

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let resized = image
        .to_dynamic_image()?
        .resize_exact(width, height, filter.to_image_filter());

    Ok(PixelBuffer::from_dynamic_image(resized)?)
}

/// Resize an image to fit within a maximum edge length while preserving aspect ratio.
///
/// The image is scaled so that its longest edge equals `max_edge`. If the
/// image already fits, it is returned unchanged.
///
/// # Errors
///
/// Returns `TransformError::InvalidArgument` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &PixelBuffer,
    max_edge: u32,
    filter: ResampleFilter,
) -> Result<PixelBuffer, TransformError> {
    if max_edge == 0 {
        return Err(TransformError::InvalidArgument(
            "max edge must be non-zero".to_string(),
        ));
    }

    let (src_width, src_height) = image.dimensions();

    // If already fits, just clone
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
