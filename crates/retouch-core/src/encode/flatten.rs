//! Alpha flattening for formats without an alpha channel.

use crate::buffer::{BufferError, PixelBuffer};

/// Composite an RGBA buffer over an opaque background, yielding RGB.
///
/// Each channel becomes `(c * a + bg * (255 - a) + 127) / 255`. RGB input is
/// returned as a clone.
pub fn flatten_alpha(
    image: &PixelBuffer,
    background: [u8; 3],
) -> Result<PixelBuffer, BufferError> {
    if !image.has_alpha() {
        return Ok(image.clone());
    }

    let mut rgb = Vec::with_capacity(image.pixel_count() as usize * 3);
    for px in image.samples().chunks_exact(4) {
        let alpha = px[3] as u32;
        for (channel, bg) in px[..3].iter().zip(background) {
            let blended = (*channel as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }

    PixelBuffer::from_rgb(image.width(), image.height(), rgb)
}
