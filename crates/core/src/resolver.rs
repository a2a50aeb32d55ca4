//! Score/tier resolution.
//!
//! Model output is treated as a suggestion. The canonical catalogue always wins
//! when it recognises the label, either exactly or by substring containment.

use std::cmp::Reverse;
use std::sync::LazyLock;

use crate::species::{official_score, scored_species};
use crate::tier::Tier;

/// Score assumed for a label the catalogue does not know when a record has no
/// score of its own to fall back on (duplicate sightings are stored as 0).
pub const DEFAULT_SUGGESTED_SCORE: i64 = 10;

/// Scored labels ordered longest first; equal lengths keep catalogue order.
static KEYS_BY_LENGTH: LazyLock<Vec<(&'static str, i64)>> = LazyLock::new(|| {
    let mut keys: Vec<(&'static str, i64)> = scored_species().collect();
    keys.sort_by_key(|(name, _)| Reverse(name.chars().count()));
    keys
});

/// Canonical score for `cloud_name`.
///
/// 1. Exact catalogue match.
/// 2. First catalogue key, longest first, that contains or is contained by the
///    name. Longer keys win so that `浓积云` is not swallowed by `积云`.
/// 3. `ai_suggested_score` unchanged.
#[must_use]
pub fn resolve_score(cloud_name: &str, ai_suggested_score: i64) -> i64 {
    if let Some(score) = official_score(cloud_name) {
        return score;
    }
    KEYS_BY_LENGTH
        .iter()
        .find(|(key, _)| cloud_name.contains(key) || key.contains(cloud_name))
        .map_or(ai_suggested_score, |&(_, score)| score)
}

/// Tier band for a score. Upper bounds are inclusive.
#[must_use]
pub const fn tier_for_score(score: i64) -> Tier {
    match score {
        i64::MIN..=10 => Tier::N,
        11..=29 => Tier::R,
        30..=39 => Tier::SR,
        40..=49 => Tier::SSR,
        _ => Tier::UR,
    }
}

/// Points awarded for a sighting: the full official score the first time a
/// species enters the ledger, nothing afterwards.
#[must_use]
pub const fn discovery_award(official_score: i64, is_first_sighting: bool) -> i64 {
    if is_first_sighting { official_score } else { 0 }
}

/// Score shown for a stored record. Zero-score duplicates display the
/// species' resolver score instead of their stored 0.
#[must_use]
pub fn display_score(cloud_name: &str, stored_score: i64) -> i64 {
    if stored_score > 0 {
        stored_score
    } else {
        resolve_score(cloud_name, DEFAULT_SUGGESTED_SCORE)
    }
}

/// Tier shown for a stored record, derived from [`display_score`].
#[must_use]
pub fn display_tier(cloud_name: &str, stored_score: i64) -> Tier {
    tier_for_score(display_score(cloud_name, stored_score))
}
