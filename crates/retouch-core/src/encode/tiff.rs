//! LZW-compressed TIFF encoding.
//!
//! The `image` crate's TIFF encoder writes uncompressed strips, so this goes
//! through the `tiff` crate directly to get LZW.

use std::io::Cursor;

use tiff::encoder::{colortype, Compression, TiffEncoder};

use super::ExportError;
use crate::buffer::{ChannelLayout, PixelBuffer};

fn tiff_error(err: tiff::TiffError) -> ExportError {
    ExportError::EncodingFailed(format!("TIFF: {}", err))
}

/// Encode a buffer as a single-page LZW TIFF, keeping alpha if present.
pub fn encode_tiff(image: &PixelBuffer) -> Result<Vec<u8>, ExportError> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut cursor)
            .map_err(tiff_error)?
            .with_compression(Compression::Lzw);
        let (width, height) = image.dimensions();
        match image.layout() {
            ChannelLayout::Rgb => encoder
                .write_image::<colortype::RGB8>(width, height, image.samples())
                .map_err(tiff_error)?,
            ChannelLayout::Rgba => encoder
                .write_image::<colortype::RGBA8>(width, height, image.samples())
                .map_err(tiff_error)?,
        }
    }
    Ok(cursor.into_inner())
}
