#![expect(clippy::unwrap_used, reason = "test code")]

use std::io::Cursor;

use chrono::NaiveDate;
use cloud_hunter_core::Tier;
use image::{ImageFormat, Rgb, RgbImage};

use crate::{
    CARD_WIDTH, FOOTER_BACKGROUND, FOOTER_HEIGHT, ImagingError, MAX_PHOTO_HEIGHT,
    ShareCardRenderer, THUMBNAIL_SIZE, UploadFormat, card_photo_height, inspect_upload, load_font,
    thumbnail_png,
};

/// Noisy image so the encoded file is comfortably above the size floor.
fn sky_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let v = (x.wrapping_mul(31) ^ y.wrapping_mul(17)) as u8;
        Rgb([v, v.wrapping_add(60), 200])
    });
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), format).unwrap();
    out
}

#[test]
fn test_inspect_accepts_png_and_jpeg() {
    let png = inspect_upload(&sky_image(64, 48, ImageFormat::Png)).unwrap();
    assert_eq!(png.format, UploadFormat::Png);
    assert_eq!((png.width, png.height), (64, 48));
    assert_eq!(png.format.mime_type(), "image/png");

    let jpeg = inspect_upload(&sky_image(64, 48, ImageFormat::Jpeg)).unwrap();
    assert_eq!(jpeg.format, UploadFormat::Jpeg);
    assert_eq!(jpeg.format.mime_type(), "image/jpeg");
}

#[test]
fn test_inspect_rejects_tiny_upload() {
    let err = inspect_upload(&[0x89, b'P', b'N', b'G']).unwrap_err();
    assert!(matches!(err, ImagingError::TooSmall { len: 4 }));
    assert!(err.is_input_rejection());
}

#[test]
fn test_inspect_rejects_unknown_bytes() {
    let err = inspect_upload(&[7_u8; 512]).unwrap_err();
    assert!(matches!(err, ImagingError::UnsupportedFormat(_)));
}

#[test]
fn test_inspect_rejects_truncated_png() {
    let mut png = sky_image(64, 64, ImageFormat::Png);
    png.truncate(120);
    let err = inspect_upload(&png).unwrap_err();
    assert!(matches!(err, ImagingError::Decode(_)));
    assert!(err.is_input_rejection());
}

#[test]
fn test_inspect_rejects_sliver_image() {
    let sliver = sky_image(2, 40_000, ImageFormat::Png);
    let err = inspect_upload(&sliver).unwrap_err();
    assert!(matches!(err, ImagingError::Dimensions { width: 2, height: 40_000 }));
    assert!(err.is_input_rejection());
}

#[test]
fn test_card_photo_height_bounds() {
    assert_eq!(card_photo_height(500, 250).unwrap(), 500);
    assert_eq!(card_photo_height(1000, 4000).unwrap(), MAX_PHOTO_HEIGHT);
    assert!(card_photo_height(1000, 4001).is_err());
    assert_eq!(card_photo_height(40_000, 2).unwrap(), 1);
    assert!(card_photo_height(1, u32::MAX).is_err());
}

#[test]
fn test_thumbnail_is_square_png() {
    let thumb = thumbnail_png(&sky_image(640, 360, ImageFormat::Png)).unwrap();
    let decoded = image::load_from_memory_with_format(&thumb, ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (THUMBNAIL_SIZE, THUMBNAIL_SIZE));
}

#[test]
fn test_card_without_font_draws_badge_block() {
    let renderer = ShareCardRenderer::new(None);
    assert!(!renderer.has_font());
    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

    let card = renderer
        .render(&sky_image(500, 250, ImageFormat::Png), "积雨云", Tier::UR, 50, date)
        .unwrap();
    let card = image::load_from_memory(&card).unwrap().to_rgb8();

    assert_eq!(card.width(), CARD_WIDTH);
    assert_eq!(card.height(), 500 + FOOTER_HEIGHT);
    assert_eq!(card.get_pixel(CARD_WIDTH - 10, card.height() - 10).0, FOOTER_BACKGROUND);
    assert_eq!(card.get_pixel(100, 500 + 100).0, Tier::UR.rgb());
    assert_eq!(card.get_pixel(500, 501).0, Tier::UR.rgb());
}

#[test]
fn test_card_rejects_garbage() {
    let renderer = ShareCardRenderer::new(None);
    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let err = renderer.render(b"not an image", "积云", Tier::N, 10, date).unwrap_err();
    assert!(matches!(err, ImagingError::Decode(_)));
}

#[test]
fn test_card_rejects_sliver_without_allocating() {
    let renderer = ShareCardRenderer::new(None);
    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let sliver = sky_image(2, 40_000, ImageFormat::Png);
    let err = renderer.render(&sliver, "积云", Tier::N, 10, date).unwrap_err();
    assert!(matches!(err, ImagingError::Dimensions { .. }));
}

#[test]
fn test_load_font_rejects_non_font() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("fake.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();
    assert!(matches!(load_font(&path).unwrap_err(), ImagingError::Font(_)));
    assert!(matches!(load_font(&dir.path().join("missing.ttf")).unwrap_err(), ImagingError::Io(_)));
}
