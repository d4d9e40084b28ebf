//! Mask-to-alpha application.
//!
//! The image is raised to RGBA if needed and its alpha channel is replaced
//! by the mask. Applying a second mask replaces the first one rather than
//! combining with it.

use super::{Mask, MaskError};
use crate::buffer::PixelBuffer;

/// Return a copy of `image` whose alpha channel is `mask`.
///
/// # Errors
/// Returns `MaskError::DimensionMismatch` if the mask size differs from the
/// image size.
pub fn apply_alpha_mask(image: &PixelBuffer, mask: &Mask) -> Result<PixelBuffer, MaskError> {
    if (mask.width(), mask.height()) != image.dimensions() {
        return Err(MaskError::DimensionMismatch {
            mask_width: mask.width(),
            mask_height: mask.height(),
            image_width: image.width(),
            image_height: image.height(),
        });
    }

    let rgba = image.with_alpha();
    let mut output = rgba.samples().to_vec();
    for (px, &alpha) in output.chunks_exact_mut(4).zip(mask.values()) {
        px[3] = alpha;
    }

    Ok(rgba.with_samples(output))
}
