//! Ellipse inscribed in the image bounding box.

use super::Mask;

/// Mask that is inside for every pixel whose centre lies within the ellipse
/// touching all four image edges.
///
/// For a square image this is a circle of diameter `width`.
pub fn ellipse_mask(width: u32, height: u32) -> Mask {
    let rx = width as f64 / 2.0;
    let ry = height as f64 / 2.0;

    Mask::from_fn(width, height, |x, y| {
        let dx = (x - rx) / rx;
        let dy = (y - ry) / ry;
        dx * dx + dy * dy <= 1.0
    })
}
