#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    reason = "card geometry stays far below i32::MAX"
)]

use std::io::Cursor;

use ab_glyph::{FontVec, PxScale};
use chrono::NaiveDate;
use cloud_hunter_core::{Tier, english_name};
use image::imageops::FilterType;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::{ImagingError, Result};

/// Width every photo is scaled to.
pub const CARD_WIDTH: u32 = 1000;
/// Minimum footer band under the photo.
pub const FOOTER_HEIGHT: u32 = 350;
/// Tallest photo band a card may have once scaled to [`CARD_WIDTH`]; a 1:4
/// portrait is the narrowest accepted shape.
pub const MAX_PHOTO_HEIGHT: u32 = 4 * CARD_WIDTH;
pub const FOOTER_BACKGROUND: [u8; 3] = [250, 249, 246];

const PADDING: u32 = 50;
const RULE_THICKNESS: u32 = 3;
const BADGE_OFFSET: u32 = 55;
const BADGE_SIZE: f32 = 100.0;
const SCORE_SIZE: f32 = 100.0;
const SCORE_LABEL: &str = "分";
const SCORE_LABEL_SIZE: f32 = 30.0;
const NAME_OFFSET: u32 = 180;
const NAME_SIZE: f32 = 80.0;
const ENGLISH_OFFSET: u32 = 100;
const ENGLISH_SIZE: f32 = 40.0;
const STAMP_SIZE: f32 = 30.0;
const BOTTOM_MARGIN: u32 = 40;

const TEXT_MAIN: Rgb<u8> = Rgb([44, 62, 80]);
const TEXT_SUB: Rgb<u8> = Rgb([127, 140, 141]);

/// Renders the shareable observation card.
///
/// Without a font the layout keeps its badge as a tier-colored block and
/// skips all text.
pub struct ShareCardRenderer {
    font: Option<FontVec>,
}

impl std::fmt::Debug for ShareCardRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCardRenderer").field("has_font", &self.font.is_some()).finish()
    }
}

impl ShareCardRenderer {
    #[must_use]
    pub const fn new(font: Option<FontVec>) -> Self {
        Self { font }
    }

    #[must_use]
    pub const fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Photo scaled to [`CARD_WIDTH`] over a footer with tier, score, names
    /// and an observation stamp. Returns PNG bytes.
    ///
    /// # Errors
    /// Returns an error if the photo cannot be decoded or the PNG not written.
    pub fn render(
        &self,
        image: &[u8],
        cloud_name: &str,
        tier: Tier,
        score: i64,
        date: NaiveDate,
    ) -> Result<Vec<u8>> {
        let photo = image::load_from_memory(image).map_err(ImagingError::Decode)?;
        let photo_height = card_photo_height(photo.width(), photo.height())?;
        let photo = photo.resize_exact(CARD_WIDTH, photo_height, FilterType::Lanczos3).to_rgb8();

        let english = english_name(cloud_name);
        let name_y = photo_height + NAME_OFFSET;
        let stamp_y = name_y + if english.is_some() { NAME_OFFSET } else { ENGLISH_OFFSET };
        let footer = if self.font.is_some() {
            FOOTER_HEIGHT.max(stamp_y - photo_height + STAMP_SIZE as u32 + BOTTOM_MARGIN)
        } else {
            FOOTER_HEIGHT
        };

        let mut canvas = RgbImage::from_pixel(CARD_WIDTH, photo_height + footer, Rgb(FOOTER_BACKGROUND));
        image::imageops::replace(&mut canvas, &photo, 0, 0);

        let accent = Rgb(tier.rgb());
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(PADDING as i32, photo_height as i32).of_size(CARD_WIDTH - 2 * PADDING, RULE_THICKNESS),
            accent,
        );
        let badge_y = photo_height + BADGE_OFFSET;

        let Some(font) = &self.font else {
            draw_filled_rect_mut(
                &mut canvas,
                Rect::at(PADDING as i32, badge_y as i32).of_size(BADGE_SIZE as u32, BADGE_SIZE as u32),
                accent,
            );
            return encode_png(&canvas);
        };

        draw_text_mut(&mut canvas, accent, PADDING as i32, badge_y as i32, BADGE_SIZE, font, tier.as_str());

        let score_text = score.to_string();
        let (score_w, _) = text_size(PxScale::from(SCORE_SIZE), font, &score_text);
        let (label_w, _) = text_size(PxScale::from(SCORE_LABEL_SIZE), font, SCORE_LABEL);
        let right = (CARD_WIDTH - PADDING) as i32;
        let label_x = right - label_w as i32;
        draw_text_mut(
            &mut canvas,
            accent,
            label_x,
            (badge_y + BADGE_OFFSET) as i32,
            SCORE_LABEL_SIZE,
            font,
            SCORE_LABEL,
        );
        draw_text_mut(&mut canvas, accent, label_x - score_w as i32 - 10, badge_y as i32, SCORE_SIZE, font, &score_text);

        draw_text_mut(&mut canvas, TEXT_MAIN, PADDING as i32, name_y as i32, NAME_SIZE, font, cloud_name);
        if let Some(english) = english {
            draw_text_mut(
                &mut canvas,
                TEXT_SUB,
                PADDING as i32,
                (name_y + ENGLISH_OFFSET) as i32,
                ENGLISH_SIZE,
                font,
                english,
            );
        }

        let stamp = format!("观测于 {}  |  云彩收集者手册", date.format("%Y.%m.%d"));
        draw_text_mut(&mut canvas, TEXT_SUB, PADDING as i32, stamp_y as i32, STAMP_SIZE, font, &stamp);

        encode_png(&canvas)
    }
}

/// Height of the photo band once a `width` x `height` image is scaled to
/// [`CARD_WIDTH`].
///
/// # Errors
/// `Dimensions` when the band would exceed [`MAX_PHOTO_HEIGHT`].
pub fn card_photo_height(width: u32, height: u32) -> Result<u32> {
    let scaled = u64::from(height) * u64::from(CARD_WIDTH) / u64::from(width.max(1));
    match u32::try_from(scaled) {
        Ok(h) if h <= MAX_PHOTO_HEIGHT => Ok(h.max(1)),
        _ => Err(ImagingError::Dimensions { width, height }),
    }
}

fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).map_err(ImagingError::Encode)?;
    Ok(out)
}
