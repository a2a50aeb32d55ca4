//! Image handling for cloud-hunter
//!
//! Validates uploads before they reach the classifier, derives square
//! thumbnails and renders the shareable observation card.

mod card;
mod error;
mod font;
mod thumbnail;
mod upload;

#[cfg(test)]
mod tests;

pub use card::{
    CARD_WIDTH, FOOTER_BACKGROUND, FOOTER_HEIGHT, MAX_PHOTO_HEIGHT, ShareCardRenderer,
    card_photo_height,
};
pub use error::ImagingError;
pub use font::{FONT_ENV_VAR, discover_font, font_candidates, load_font};
pub use thumbnail::{THUMBNAIL_SIZE, thumbnail_png};
pub use upload::{MIN_UPLOAD_BYTES, UploadFormat, UploadImage, inspect_upload};

pub type Result<T> = std::result::Result<T, ImagingError>;
