//! Source image decoding for Retouch.
//!
//! This module turns the raw bytes handed over by the shell into a
//! [`PixelBuffer`](crate::buffer::PixelBuffer):
//! - Format sniffing and decoding (PNG, JPEG, TIFF, WebP, BMP)
//! - Optional EXIF orientation correction
//! - Normalization to 3-channel RGB
//!
//! Reading files from disk is the caller's job; everything here works on
//! in-memory byte slices.

mod source;
mod types;

pub use source::decode_image;
pub use types::{DecodeError, Orientation};
