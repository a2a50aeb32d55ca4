//! Sighting records and classifier output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::{display_score, display_tier};
use crate::species::english_name;
use crate::tier::Tier;

/// Label used when the classifier does not name the cloud.
pub const UNKNOWN_CLOUD_NAME: &str = "未知";
/// Placeholder for missing trivia text.
pub const MISSING_TEXT: &str = "暂无";

/// Structured result of classifying one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Whether the picture shows sky or cloud content at all.
    pub is_cloud: bool,
    pub cloud_name: String,
    /// Model-suggested score, untrusted.
    pub score_suggestion: i64,
    pub science_fact: String,
    pub weather_tip: String,
}

/// Row about to be written; score and tier are already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObservation {
    pub cloud_name: String,
    pub tier: Tier,
    pub score: i64,
    pub science_fact: String,
    pub weather_tip: String,
    pub image_data: Vec<u8>,
    pub image_hash: String,
}

/// A stored sighting without its image blob, as used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationEntry {
    pub id: i64,
    pub cloud_name: String,
    pub tier: Tier,
    /// Awarded points; 0 for a repeat sighting of a known species.
    pub score: i64,
    pub science_fact: String,
    pub weather_tip: String,
    pub image_hash: String,
    pub created_at: DateTime<Utc>,
}

impl ObservationEntry {
    /// Whether this sighting consumed the species' discovery bonus.
    #[must_use]
    pub const fn is_discovery(&self) -> bool {
        self.score > 0
    }

    /// Awarded points, or the species' rarity score for a repeat sighting.
    /// This is what cards and history rows print.
    #[must_use]
    pub fn display_score(&self) -> i64 {
        display_score(&self.cloud_name, self.score)
    }

    #[must_use]
    pub fn display_tier(&self) -> Tier {
        display_tier(&self.cloud_name, self.score)
    }

    #[must_use]
    pub fn english_name(&self) -> Option<&'static str> {
        english_name(&self.cloud_name)
    }
}

/// A full stored sighting, including the original upload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudObservation {
    pub entry: ObservationEntry,
    pub image_data: Vec<u8>,
}

impl CloudObservation {
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.entry.id
    }

    #[must_use]
    pub fn into_parts(self) -> (ObservationEntry, Vec<u8>) {
        (self.entry, self.image_data)
    }
}

/// Observation plus the derived display fields the UI renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationView {
    #[serde(flatten)]
    pub entry: ObservationEntry,
    pub english_name: Option<&'static str>,
    pub display_score: i64,
    pub display_tier: Tier,
    pub display_color: &'static str,
    pub is_discovery: bool,
}

impl From<ObservationEntry> for ObservationView {
    fn from(entry: ObservationEntry) -> Self {
        let display_tier = entry.display_tier();
        Self {
            english_name: entry.english_name(),
            display_score: entry.display_score(),
            display_color: display_tier.color(),
            is_discovery: entry.is_discovery(),
            display_tier,
            entry,
        }
    }
}
