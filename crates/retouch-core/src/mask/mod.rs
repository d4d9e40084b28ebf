//! Binary shape masks for non-rectangular region selection.
//!
//! A [`Mask`] is a single-channel image the size of the buffer it is applied
//! to. Values are 255 inside the shape and 0 outside. Applying a mask writes
//! it into the alpha channel; color samples are left alone.
//!
//! ## Mask Shapes
//!
//! - **Ellipse**: inscribed in the full image bounding box
//! - **Triangle**: apex at the top centre, base along the bottom edge
//!
//! Pixels are sampled at their centres, `(x + 0.5, y + 0.5)`.

pub mod apply;
pub mod ellipse;
pub mod triangle;

use thiserror::Error;

pub use apply::apply_alpha_mask;
pub use ellipse::ellipse_mask;
pub use triangle::triangle_mask;

/// Value written inside the shape.
pub const INSIDE: u8 = 255;

/// Value written outside the shape.
pub const OUTSIDE: u8 = 0;

/// Errors from mask application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    /// Mask and image sizes differ.
    #[error("Mask is {mask_width}x{mask_height} but image is {image_width}x{image_height}")]
    DimensionMismatch {
        mask_width: u32,
        mask_height: u32,
        image_width: u32,
        image_height: u32,
    },
}

/// Single-channel 8-bit mask in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    values: Vec<u8>,
}

impl Mask {
    /// Build a mask by evaluating `inside` at every pixel centre.
    pub fn from_fn(width: u32, height: u32, inside: impl Fn(f64, f64) -> bool) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let cy = y as f64 + 0.5;
            for x in 0..width {
                let cx = x as f64 + 0.5;
                values.push(if inside(cx, cy) { INSIDE } else { OUTSIDE });
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Mask value at `(x, y)`, or `None` outside the mask.
    pub fn value(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y as usize * self.width as usize + x as usize])
    }

    /// Fraction of pixels inside the shape (0.0 to 1.0).
    pub fn coverage(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let inside = self.values.iter().filter(|&&v| v == INSIDE).count();
        inside as f64 / self.values.len() as f64
    }
}
