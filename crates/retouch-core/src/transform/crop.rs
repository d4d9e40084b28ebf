//! Shape-driven cropping.
//!
//! Square and Rectangle are hard crops: the output is smaller than the input
//! and keeps its channel layout. Circle and Triangle are soft crops: the
//! output keeps its dimensions and the shape is carried in the alpha channel.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel
//! - Regions are half-open: `left..right`, `top..bottom`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TransformError;
use crate::buffer::PixelBuffer;
use crate::mask::{apply_alpha_mask, ellipse_mask, triangle_mask};
use crate::ParseNameError;

/// Margin removed from every side by [`CropShape::Rectangle`].
pub const RECTANGLE_MARGIN: u32 = 50;

/// Named crop shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropShape {
    /// Identity.
    #[default]
    None,
    /// Ellipse inscribed in the image, applied as alpha.
    Circle,
    /// Largest centred square, hard crop.
    Square,
    /// Apex-up triangle, applied as alpha.
    Triangle,
    /// Fixed-margin inset, hard crop.
    Rectangle,
}

impl CropShape {
    /// Every shape, in menu order.
    pub const ALL: [CropShape; 5] = [
        CropShape::None,
        CropShape::Circle,
        CropShape::Square,
        CropShape::Triangle,
        CropShape::Rectangle,
    ];

    /// Lowercase name accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            CropShape::None => "none",
            CropShape::Circle => "circle",
            CropShape::Square => "square",
            CropShape::Triangle => "triangle",
            CropShape::Rectangle => "rectangle",
        }
    }

    /// Whether this shape is applied through the alpha channel.
    pub fn is_mask(self) -> bool {
        matches!(self, CropShape::Circle | CropShape::Triangle)
    }
}

impl fmt::Display for CropShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CropShape {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CropShape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseNameError::new("crop shape", s))
    }
}

/// Pixel rectangle, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRegion {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Largest square centred in a `width` x `height` image.
pub fn square_region(width: u32, height: u32) -> CropRegion {
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;
    CropRegion {
        left,
        top,
        right: left + side,
        bottom: top + side,
    }
}

/// Inset region with [`RECTANGLE_MARGIN`] removed from each side.
///
/// # Errors
/// Returns `TransformError::InvalidGeometry` when either dimension is 100 px
/// or less, since the margins would meet or cross.
pub fn rectangle_region(width: u32, height: u32) -> Result<CropRegion, TransformError> {
    let region = CropRegion {
        left: RECTANGLE_MARGIN,
        top: RECTANGLE_MARGIN,
        right: width.saturating_sub(RECTANGLE_MARGIN),
        bottom: height.saturating_sub(RECTANGLE_MARGIN),
    };
    if region.width() == 0 || region.height() == 0 {
        return Err(TransformError::InvalidGeometry {
            region,
            width,
            height,
        });
    }
    Ok(region)
}

/// Copy `region` out of `image` into a new buffer.
///
/// # Errors
/// Returns `TransformError::InvalidGeometry` if the region is empty or
/// extends past the image.
pub fn crop_region(image: &PixelBuffer, region: CropRegion) -> Result<PixelBuffer, TransformError> {
    let (width, height) = image.dimensions();
    if region.width() == 0 || region.height() == 0 || region.right > width || region.bottom > height
    {
        return Err(TransformError::InvalidGeometry {
            region,
            width,
            height,
        });
    }

    // Fast path: full region returns a clone
    if region.left == 0 && region.top == 0 && region.right == width && region.bottom == height {
        return Ok(image.clone());
    }

    let channels = image.channels();
    let src_stride = width as usize * channels;
    let row_len = region.width() as usize * channels;
    let mut output = Vec::with_capacity(row_len * region.height() as usize);

    // Copy pixel data row by row
    for y in region.top..region.bottom {
        let start = y as usize * src_stride + region.left as usize * channels;
        output.extend_from_slice(&image.samples()[start..start + row_len]);
    }

    Ok(PixelBuffer::new(
        region.width(),
        region.height(),
        image.layout(),
        output,
    )?)
}

/// Apply a named crop shape, returning a new buffer.
pub fn apply_crop_shape(
    image: &PixelBuffer,
    shape: CropShape,
) -> Result<PixelBuffer, TransformError> {
    let (width, height) = image.dimensions();
    match shape {
        CropShape::None => Ok(image.clone()),
        CropShape::Square => crop_region(image, square_region(width, height)),
        CropShape::Rectangle => crop_region(image, rectangle_region(width, height)?),
        CropShape::Circle => Ok(apply_alpha_mask(image, &ellipse_mask(width, height))?),
        CropShape::Triangle => Ok(apply_alpha_mask(image, &triangle_mask(width, height))?),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
