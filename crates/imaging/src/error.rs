use thiserror::Error;

/// Errors from image validation and rendering.
#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("upload too small: {len} bytes")]
    TooSmall { len: usize },
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("unsupported image shape: {width}x{height}")]
    Dimensions { width: u32, height: u32 },
    #[error("image decode failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("image encode failed: {0}")]
    Encode(#[source] image::ImageError),
    #[error("font unusable: {0}")]
    Font(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ImagingError {
    /// Whether the failure is the uploader's fault rather than ours.
    #[must_use]
    pub const fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::TooSmall { .. }
                | Self::UnsupportedFormat(_)
                | Self::Dimensions { .. }
                | Self::Decode(_)
        )
    }
}
