//! Rarity tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Rarity band assigned to a sighting by score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// Common sky
    N,
    /// Rare
    R,
    /// Super rare
    SR,
    /// Specially super rare
    SSR,
    /// Ultra rare
    UR,
}

impl Tier {
    /// Rarest first, the order used by the gallery and the stats panel.
    pub const DISPLAY_ORDER: [Self; 5] = [Self::UR, Self::SSR, Self::SR, Self::R, Self::N];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::N => "N",
            Self::R => "R",
            Self::SR => "SR",
            Self::SSR => "SSR",
            Self::UR => "UR",
        }
    }

    /// Hex color used for badges, card accents and gallery headings.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match *self {
            Self::UR => "#c0392b",
            Self::SSR => "#f1c40f",
            Self::SR => "#8e44ad",
            Self::R => "#2980b9",
            Self::N => "#7f8c8d",
        }
    }

    /// Same color as [`Tier::color`] as an RGB triple.
    #[must_use]
    pub const fn rgb(&self) -> [u8; 3] {
        match *self {
            Self::UR => [0xc0, 0x39, 0x2b],
            Self::SSR => [0xf1, 0xc4, 0x0f],
            Self::SR => [0x8e, 0x44, 0xad],
            Self::R => [0x29, 0x80, 0xb9],
            Self::N => [0x7f, 0x8c, 0x8d],
        }
    }

    /// Lenient parse for stored or model-provided tier text.
    ///
    /// Upper-cases, trims and keeps the first whitespace-separated token, so
    /// `" ssr (rare) "` becomes [`Tier::SSR`]. Anything unrecognized, including
    /// missing input, coerces to [`Tier::N`].
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.split_whitespace().next())
            .and_then(|token| token.parse().ok())
            .unwrap_or(Self::N)
    }
}

impl FromStr for Tier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N" => Ok(Self::N),
            "R" => Ok(Self::R),
            "SR" => Ok(Self::SR),
            "SSR" => Ok(Self::SSR),
            "UR" => Ok(Self::UR),
            _ => Err(CoreError::InvalidTier(s.to_owned())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_takes_first_token() {
        assert_eq!(Tier::normalize(Some(" ssr (rare) ")), Tier::SSR);
        assert_eq!(Tier::normalize(Some("ur")), Tier::UR);
        assert_eq!(Tier::normalize(Some("SR")), Tier::SR);
    }

    #[test]
    fn normalize_coerces_garbage_to_n() {
        assert_eq!(Tier::normalize(None), Tier::N);
        assert_eq!(Tier::normalize(Some("")), Tier::N);
        assert_eq!(Tier::normalize(Some("   ")), Tier::N);
        assert_eq!(Tier::normalize(Some("legendary")), Tier::N);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert!("mythic".parse::<Tier>().is_err());
        assert_eq!("r".parse::<Tier>().ok(), Some(Tier::R));
    }

    #[test]
    fn serde_uses_uppercase_labels() {
        assert_eq!(serde_json::to_string(&Tier::SSR).ok().as_deref(), Some("\"SSR\""));
    }
}
