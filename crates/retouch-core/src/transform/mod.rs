//! Geometric operations: shape crops and resampling.
//!
//! Every operation takes a buffer by reference and returns a new buffer, so
//! a failed transform leaves its input untouched.

mod crop;
mod resize;

use thiserror::Error;

use crate::buffer::BufferError;
use crate::mask::MaskError;

pub use crop::{
    apply_crop_shape, crop_region, rectangle_region, square_region, CropRegion, CropShape,
    RECTANGLE_MARGIN,
};
pub use resize::{parse_dimension, resize, resize_to_fit, target_dimensions, ResampleFilter};

/// Errors from geometric transforms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A caller-supplied value is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested region does not fit inside the image.
    #[error(
        "Invalid geometry: region ({}, {})-({}, {}) does not fit a {width}x{height} image",
        .region.left, .region.top, .region.right, .region.bottom
    )]
    InvalidGeometry {
        region: CropRegion,
        width: u32,
        height: u32,
    },

    #[error(transparent)]
    Mask(#[from] MaskError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}
