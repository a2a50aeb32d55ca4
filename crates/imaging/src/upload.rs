use image::ImageFormat;

use crate::card::card_photo_height;
use crate::{ImagingError, Result};

/// Anything shorter cannot be a real photo.
pub const MIN_UPLOAD_BYTES: usize = 100;

/// Upload encodings the classifier accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Jpeg,
    Png,
    Webp,
}

impl UploadFormat {
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    const fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Webp => ImageFormat::WebP,
        }
    }
}

/// A validated upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadImage {
    pub format: UploadFormat,
    pub width: u32,
    pub height: u32,
}

/// Check that `bytes` is a decodable JPEG, PNG or WEBP image.
///
/// The format is sniffed from the magic bytes, never from a filename.
///
/// # Errors
/// `TooSmall` under [`MIN_UPLOAD_BYTES`], `UnsupportedFormat` for anything
/// else, `Decode` if the data is corrupt, `Dimensions` if the image is too
/// narrow to fit on a share card.
pub fn inspect_upload(bytes: &[u8]) -> Result<UploadImage> {
    if bytes.len() < MIN_UPLOAD_BYTES {
        return Err(ImagingError::TooSmall { len: bytes.len() });
    }
    let format = match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => UploadFormat::Jpeg,
        Ok(ImageFormat::Png) => UploadFormat::Png,
        Ok(ImageFormat::WebP) => UploadFormat::Webp,
        Ok(other) => return Err(ImagingError::UnsupportedFormat(format!("{other:?}"))),
        Err(_) => return Err(ImagingError::UnsupportedFormat("unrecognised data".to_owned())),
    };
    let decoded = image::load_from_memory_with_format(bytes, format.image_format())
        .map_err(ImagingError::Decode)?;
    let (width, height) = (decoded.width(), decoded.height());
    card_photo_height(width, height)?;
    Ok(UploadImage { format, width, height })
}
