//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! The grayscale and saturation filters share this helper. Weights are
//! 16-bit fixed point so a neutral gray maps to itself exactly.

// BT.601 weights (0.299, 0.587, 0.114) scaled by 2^16. They sum to exactly 65536.
const LUMA_R_FIXED: u32 = 19595;
const LUMA_G_FIXED: u32 = 38470;
const LUMA_B_FIXED: u32 = 7471;

/// Calculate luma from u8 RGB values (0 to 255), rounded to nearest.
#[inline]
pub fn calculate_luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let weighted =
        r as u32 * LUMA_R_FIXED + g as u32 * LUMA_G_FIXED + b as u32 * LUMA_B_FIXED + 0x8000;
    (weighted >> 16) as u8
}
