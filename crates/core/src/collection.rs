//! Collection aggregates recomputed from the ledger on every read.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::observation::{ObservationEntry, ObservationView};
use crate::resolver::tier_for_score;
use crate::species::{CANONICAL_SPECIES_COUNT, english_name};
use crate::tier::Tier;

/// All sightings of one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesGroup {
    pub cloud_name: String,
    pub english_name: Option<&'static str>,
    pub tier: Tier,
    /// Newest first; the first entry is the cover image.
    pub records: Vec<ObservationView>,
}

impl SpeciesGroup {
    #[must_use]
    pub fn cover(&self) -> Option<&ObservationView> {
        self.records.first()
    }
}

/// Species of one tier, for one gallery shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierShelf {
    pub tier: Tier,
    pub color: &'static str,
    pub species: Vec<SpeciesGroup>,
}

/// Per-tier species counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TierCounts {
    pub ur: usize,
    pub ssr: usize,
    pub sr: usize,
    pub r: usize,
    pub n: usize,
}

impl TierCounts {
    fn bump(&mut self, tier: Tier) {
        let slot = match tier {
            Tier::UR => &mut self.ur,
            Tier::SSR => &mut self.ssr,
            Tier::SR => &mut self.sr,
            Tier::R => &mut self.r,
            Tier::N => &mut self.n,
        };
        *slot += 1;
    }

    #[must_use]
    pub const fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::UR => self.ur,
            Tier::SSR => self.ssr,
            Tier::SR => self.sr,
            Tier::R => self.r,
            Tier::N => self.n,
        }
    }
}

/// Derived view of the whole ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub total_score: i64,
    pub observation_count: usize,
    pub unique_species: usize,
    pub canonical_species: usize,
    pub tier_counts: TierCounts,
    pub collected: BTreeSet<String>,
    /// Non-empty shelves only, rarest tier first.
    pub gallery: Vec<TierShelf>,
}

impl CollectionSummary {
    /// Build the summary from ledger rows. Order of `entries` decides record
    /// order inside each species group, so pass them newest first.
    #[must_use]
    pub fn from_entries(entries: Vec<ObservationEntry>) -> Self {
        let observation_count = entries.len();
        let total_score = entries.iter().map(|e| e.score).sum();

        let mut order: Vec<String> = Vec::new();
        let mut by_species: BTreeMap<String, Vec<ObservationView>> = BTreeMap::new();
        for entry in entries {
            let records = by_species.entry(entry.cloud_name.clone()).or_insert_with(|| {
                order.push(entry.cloud_name.clone());
                Vec::new()
            });
            records.push(ObservationView::from(entry));
        }

        let mut tier_counts = TierCounts::default();
        let mut shelves: BTreeMap<Tier, Vec<SpeciesGroup>> = BTreeMap::new();
        for name in &order {
            let Some(records) = by_species.remove(name) else { continue };
            let best = records.iter().map(|r| r.display_score).max().unwrap_or(0);
            let tier = tier_for_score(best);
            tier_counts.bump(tier);
            shelves.entry(tier).or_default().push(SpeciesGroup {
                english_name: english_name(name),
                cloud_name: name.clone(),
                tier,
                records,
            });
        }

        let gallery = Tier::DISPLAY_ORDER
            .iter()
            .filter_map(|tier| {
                shelves.remove(tier).map(|species| TierShelf {
                    tier: *tier,
                    color: tier.color(),
                    species,
                })
            })
            .collect();

        Self {
            total_score,
            observation_count,
            unique_species: order.len(),
            canonical_species: CANONICAL_SPECIES_COUNT,
            tier_counts,
            collected: order.into_iter().collect(),
            gallery,
        }
    }

    #[must_use]
    pub fn species(&self, name: &str) -> Option<&SpeciesGroup> {
        self.gallery.iter().flat_map(|shelf| &shelf.species).find(|g| g.cloud_name == name)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(id: i64, name: &str, score: i64) -> ObservationEntry {
        ObservationEntry {
            id,
            cloud_name: name.to_owned(),
            tier: tier_for_score(score),
            score,
            science_fact: "fact".to_owned(),
            weather_tip: "tip".to_owned(),
            image_hash: format!("hash-{id}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_ledger() {
        let summary = CollectionSummary::from_entries(Vec::new());
        assert_eq!(summary.total_score, 0);
        assert_eq!(summary.unique_species, 0);
        assert_eq!(summary.canonical_species, 42);
        assert!(summary.gallery.is_empty());
    }

    #[test]
    fn aggregates_group_by_tier_then_species() {
        let summary = CollectionSummary::from_entries(vec![
            entry(4, "积云", 0),
            entry(3, "夜光云", 45),
            entry(2, "积云", 10),
            entry(1, "红色精灵", 80),
        ]);
        assert_eq!(summary.total_score, 135);
        assert_eq!(summary.observation_count, 4);
        assert_eq!(summary.unique_species, 3);
        assert_eq!(summary.tier_counts.get(Tier::UR), 1);
        assert_eq!(summary.tier_counts.get(Tier::SSR), 1);
        assert_eq!(summary.tier_counts.get(Tier::N), 1);

        let tiers: Vec<Tier> = summary.gallery.iter().map(|s| s.tier).collect();
        assert_eq!(tiers, vec![Tier::UR, Tier::SSR, Tier::N]);

        let cumulus = summary.species("积云");
        assert_eq!(cumulus.map(|g| g.records.len()), Some(2));
        assert_eq!(cumulus.and_then(SpeciesGroup::cover).map(|r| r.entry.id), Some(4));
    }

    #[test]
    fn species_with_only_repeat_sightings_keeps_its_rarity() {
        // discovery row deleted, repeat sighting remains
        let summary = CollectionSummary::from_entries(vec![entry(9, "夜光云", 0)]);
        assert_eq!(summary.species("夜光云").map(|g| g.tier), Some(Tier::SSR));
        assert_eq!(summary.total_score, 0);
    }
}
