//! Per-pixel color filters.
//!
//! Every filter reads RGB from the source, writes a new buffer with the same
//! layout and copies alpha through untouched.

use crate::buffer::PixelBuffer;
use crate::luminance::calculate_luma_u8;

/// Contrast gain around the mid-gray pivot.
pub const CONTRAST_FACTOR: i32 = 2;

/// Saturation gain relative to the pixel's luma.
pub const SATURATION_FACTOR: f32 = 1.5;

const MID_GRAY: i32 = 128;

/// Map every pixel's RGB triple through `f`, preserving alpha.
fn map_rgb(image: &PixelBuffer, f: impl Fn(u8, u8, u8) -> [u8; 3]) -> PixelBuffer {
    let channels = image.channels();
    let mut output = Vec::with_capacity(image.byte_size());

    for px in image.samples().chunks_exact(channels) {
        output.extend_from_slice(&f(px[0], px[1], px[2]));
        output.extend_from_slice(&px[3..]);
    }

    image.with_samples(output)
}

/// Replace R, G and B with the pixel's luma.
pub fn grayscale(image: &PixelBuffer) -> PixelBuffer {
    map_rgb(image, |r, g, b| {
        let l = calculate_luma_u8(r, g, b);
        [l, l, l]
    })
}

/// Classic sepia tone.
///
/// Each channel is the weighted sum truncated toward zero and then clamped
/// to 255.
pub fn sepia(image: &PixelBuffer) -> PixelBuffer {
    map_rgb(image, |r, g, b| {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        let tr = (0.393 * r + 0.769 * g + 0.189 * b) as u32;
        let tg = (0.349 * r + 0.686 * g + 0.168 * b) as u32;
        let tb = (0.272 * r + 0.534 * g + 0.131 * b) as u32;
        [tr.min(255) as u8, tg.min(255) as u8, tb.min(255) as u8]
    })
}

/// Negate every color channel.
pub fn invert(image: &PixelBuffer) -> PixelBuffer {
    map_rgb(image, |r, g, b| [255 - r, 255 - g, 255 - b])
}

/// Stretch every channel away from mid-gray by [`CONTRAST_FACTOR`].
pub fn contrast(image: &PixelBuffer) -> PixelBuffer {
    let stretch =
        |v: u8| (MID_GRAY + (v as i32 - MID_GRAY) * CONTRAST_FACTOR).clamp(0, 255) as u8;
    map_rgb(image, |r, g, b| [stretch(r), stretch(g), stretch(b)])
}

/// Push every channel away from the pixel's luma by [`SATURATION_FACTOR`].
///
/// The blended value is clamped and truncated toward zero.
pub fn saturation(image: &PixelBuffer) -> PixelBuffer {
    map_rgb(image, |r, g, b| {
        let gray = calculate_luma_u8(r, g, b) as f32;
        let boost = |v: u8| {
            let blended = gray + (v as f32 - gray) * SATURATION_FACTOR;
            blended.clamp(0.0, 255.0) as u8
        };
        [boost(r), boost(g), boost(b)]
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let size = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |samples| PixelBuffer::from_rgb(w, h, samples).unwrap())
        })
    }

    proptest! {
        /// Property: Invert is an involution.
        #[test]
        fn prop_invert_involution(img in buffer_strategy()) {
            prop_assert_eq!(invert(&invert(&img)), img);
        }

        /// Property: Grayscale output is neutral.
        #[test]
        fn prop_grayscale_neutral(img in buffer_strategy()) {
            let out = grayscale(&img);
            for px in out.samples().chunks_exact(3) {
                prop_assert!(px[0] == px[1] && px[1] == px[2]);
            }
        }

        /// Property: Grayscale is idempotent.
        #[test]
        fn prop_grayscale_idempotent(img in buffer_strategy()) {
            let once = grayscale(&img);
            prop_assert_eq!(grayscale(&once), once.clone());
        }

        /// Property: Sepia never brightens blue past red.
        #[test]
        fn prop_sepia_warm_tone(r: u8, g: u8, b: u8) {
            let img = PixelBuffer::from_rgb(1, 1, vec![r, g, b]).unwrap();
            let out = sepia(&img);
            let s = out.samples();
            prop_assert!(s[0] >= s[1] && s[1] >= s[2]);
        }
    }
}
