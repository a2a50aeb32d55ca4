use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

use crate::{ImagingError, Result};

/// Explicit font override.
pub const FONT_ENV_VAR: &str = "CLOUD_HUNTER_FONT";

const PLATFORM_FONTS: &[&str] = &[
    "C:\\Windows\\Fonts\\simkai.ttf",
    "C:\\Windows\\Fonts\\simsun.ttc",
    "/System/Library/Fonts/STKaiti.ttf",
    "/Library/Fonts/Songti.ttc",
    "/System/Library/Fonts/Supplemental/Songti.ttc",
    "/usr/share/fonts/opentype/noto/NotoSerifCJK-Regular.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
    "/usr/share/fonts/wqy-zenhei/wqy-zenhei.ttc",
];

/// Candidate font paths in lookup order: the env override first.
#[must_use]
pub fn font_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(PLATFORM_FONTS.len() + 1);
    if let Ok(custom) = std::env::var(FONT_ENV_VAR) {
        let custom = custom.trim();
        if !custom.is_empty() {
            paths.push(PathBuf::from(custom));
        }
    }
    paths.extend(PLATFORM_FONTS.iter().map(PathBuf::from));
    paths
}

/// Load a TrueType/OpenType font (first face of a collection).
///
/// # Errors
/// Returns an error if the file cannot be read or is not a font.
pub fn load_font(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path)?;
    FontVec::try_from_vec_and_index(data, 0)
        .map_err(|e| ImagingError::Font(format!("{}: {e}", path.display())))
}

/// First usable font among [`font_candidates`].
pub fn discover_font() -> Option<FontVec> {
    for path in font_candidates() {
        if !path.exists() {
            continue;
        }
        match load_font(&path) {
            Ok(font) => {
                tracing::info!(path = %path.display(), "Share card font loaded");
                return Some(font);
            },
            Err(e) => tracing::warn!(error = %e, "Skipping unusable font"),
        }
    }
    tracing::warn!("No CJK font found, share cards will be rendered without text");
    None
}
