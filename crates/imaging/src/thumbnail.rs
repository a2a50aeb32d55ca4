use std::io::Cursor;

use image::ImageFormat;
use image::imageops::FilterType;

use crate::{ImagingError, Result};

/// Edge length of gallery thumbnails.
pub const THUMBNAIL_SIZE: u32 = 300;

/// Center-cropped square thumbnail, PNG encoded.
///
/// # Errors
/// Returns an error if the source cannot be decoded or the PNG not written.
pub fn thumbnail_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let source = image::load_from_memory(bytes).map_err(ImagingError::Decode)?;
    let square = source.resize_to_fill(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);
    let mut out = Vec::new();
    square.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).map_err(ImagingError::Encode)?;
    Ok(out)
}
