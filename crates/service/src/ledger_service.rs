use std::sync::Arc;

use chrono::NaiveDate;
use cloud_hunter_core::{
    AchievementStatus, Classification, CollectionSummary, MAX_POSSIBLE_SCORE, NewObservation,
    ObservationView, Rank, RepairReport, TierCounts, TierShelf, discovery_award,
    evaluate_achievements, fingerprint, plan_repairs, rank_for_score, resolve_score,
    tier_for_score,
};
use cloud_hunter_imaging::{ShareCardRenderer, inspect_upload, thumbnail_png};
use cloud_hunter_llm::CloudClassifier;
use cloud_hunter_storage::Storage;
use serde::Serialize;

use crate::error::{Result, ServiceError};

/// Result of recording an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "observation", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// A new row was written.
    Recorded(ObservationView),
    /// The exact bytes were seen before; this is the existing row.
    Duplicate(ObservationView),
}

impl RecordOutcome {
    #[must_use]
    pub const fn observation(&self) -> &ObservationView {
        match self {
            Self::Recorded(v) | Self::Duplicate(v) => v,
        }
    }

    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Pre-classification check of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadLookup {
    pub fingerprint: String,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    /// Set when these exact bytes are already in the ledger.
    pub existing: Option<ObservationView>,
}

/// Everything the sidebar shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total_score: i64,
    pub max_possible_score: i64,
    pub observation_count: usize,
    pub unique_species: usize,
    pub canonical_species: usize,
    pub tier_counts: TierCounts,
    pub rank: Rank,
    pub next_description: String,
    pub achievements: Vec<AchievementStatus>,
}

/// Original upload bytes with their sniffed MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// The discovery ledger.
///
/// Storage calls are synchronous; `classify_upload` is the only async entry
/// point and moves its storage work onto the blocking pool itself.
#[derive(Clone)]
pub struct LedgerService {
    storage: Arc<Storage>,
    classifier: Arc<dyn CloudClassifier>,
    renderer: Arc<ShareCardRenderer>,
}

impl std::fmt::Debug for LedgerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerService")
            .field("storage", &self.storage)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl LedgerService {
    #[must_use]
    pub fn new(
        storage: Arc<Storage>,
        classifier: Arc<dyn CloudClassifier>,
        renderer: Arc<ShareCardRenderer>,
    ) -> Self {
        Self { storage, classifier, renderer }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Validate an upload and report whether it is already recorded.
    ///
    /// Read-only; the front end uses it to disable classification of a
    /// duplicate before any model call is made.
    pub fn lookup_upload(&self, bytes: &[u8]) -> Result<UploadLookup> {
        let image = inspect_upload(bytes)?;
        let hash = fingerprint(bytes);
        let existing = self.storage.get_entry_by_hash(&hash)?.map(ObservationView::from);
        Ok(UploadLookup {
            fingerprint: hash,
            mime_type: image.format.mime_type(),
            width: image.width,
            height: image.height,
            existing,
        })
    }

    /// Validate, classify and record an upload.
    ///
    /// A duplicate short-circuits before the classifier is called. Nothing is
    /// written unless the classifier recognises sky content.
    pub async fn classify_upload(&self, bytes: Vec<u8>) -> Result<RecordOutcome> {
        let this = self.clone();
        let (lookup, bytes) = tokio::task::spawn_blocking(move || {
            this.lookup_upload(&bytes).map(|lookup| (lookup, bytes))
        })
        .await??;

        if let Some(existing) = lookup.existing {
            tracing::info!(id = existing.entry.id, "Upload already recorded, skipping classification");
            return Ok(RecordOutcome::Duplicate(existing));
        }

        let classification = self.classifier.classify(&bytes, lookup.mime_type).await?;
        if !classification.is_cloud {
            tracing::info!(hash = %lookup.fingerprint, "Upload rejected: no cloud content");
            return Err(ServiceError::NotCloudContent);
        }

        let this = self.clone();
        tokio::task::spawn_blocking(move || this.record_observation(&classification, bytes)).await?
    }

    /// Score and persist an accepted classification.
    ///
    /// The catalogue score overrides the model's suggestion; only the first
    /// sighting of a species earns points. The fingerprint is taken from
    /// `image_data`; a collision returns the existing row instead of writing a
    /// second one.
    pub fn record_observation(
        &self,
        classification: &Classification,
        image_data: Vec<u8>,
    ) -> Result<RecordOutcome> {
        let image_hash = fingerprint(&image_data);
        let official = resolve_score(&classification.cloud_name, classification.score_suggestion);
        let tier = tier_for_score(official);
        let first_sighting = !self.storage.species_seen(&classification.cloud_name)?;
        let score = discovery_award(official, first_sighting);

        let new = NewObservation {
            cloud_name: classification.cloud_name.clone(),
            tier,
            score,
            science_fact: classification.science_fact.clone(),
            weather_tip: classification.weather_tip.clone(),
            image_data,
            image_hash,
        };

        let Some(id) = self.storage.insert_observation(&new)? else {
            let existing = self.storage.get_entry_by_hash(&new.image_hash)?.ok_or_else(|| {
                ServiceError::Internal(format!("duplicate {} vanished", new.image_hash))
            })?;
            return Ok(RecordOutcome::Duplicate(existing.into()));
        };

        tracing::info!(
            id,
            cloud_name = %new.cloud_name,
            tier = %tier,
            score,
            first_sighting,
            "Observation recorded"
        );
        let entry = self.storage.get_entry(id)?.ok_or_else(|| not_found(id))?;
        Ok(RecordOutcome::Recorded(entry.into()))
    }

    /// Remove exactly one sighting.
    ///
    /// The discovery bonus it carried is not transferred to another row.
    pub fn delete_observation(&self, id: i64) -> Result<()> {
        self.storage.delete_observation(id).map_err(|e| {
            if e.is_not_found() { not_found(id) } else { ServiceError::Storage(e) }
        })
    }

    /// Bring every stored score and tier in line with the current catalogue.
    ///
    /// Idempotent: an immediate second run changes nothing.
    pub fn repair_all(&self) -> Result<RepairReport> {
        let rows = self.storage.score_rows()?;
        let corrections = plan_repairs(&rows);
        let changed = self.storage.apply_corrections(&corrections)?;
        let report = RepairReport { changed };
        tracing::info!(scanned = rows.len(), changed, "Repair pass finished");
        Ok(report)
    }

    pub fn collection(&self) -> Result<CollectionSummary> {
        Ok(CollectionSummary::from_entries(self.storage.list_entries()?))
    }

    pub fn gallery(&self) -> Result<Vec<TierShelf>> {
        Ok(self.collection()?.gallery)
    }

    pub fn dashboard(&self) -> Result<Dashboard> {
        let summary = self.collection()?;
        let rank = rank_for_score(summary.total_score);
        Ok(Dashboard {
            total_score: summary.total_score,
            max_possible_score: MAX_POSSIBLE_SCORE,
            observation_count: summary.observation_count,
            unique_species: summary.unique_species,
            canonical_species: summary.canonical_species,
            tier_counts: summary.tier_counts,
            next_description: rank.next_description(),
            rank,
            achievements: evaluate_achievements(&summary.collected),
        })
    }

    /// All sightings of one species, newest first. Empty for unseen names.
    pub fn species_history(&self, cloud_name: &str) -> Result<Vec<ObservationView>> {
        Ok(self.storage.species_entries(cloud_name)?.into_iter().map(ObservationView::from).collect())
    }

    pub fn observation(&self, id: i64) -> Result<ObservationView> {
        let entry = self.storage.get_entry(id)?.ok_or_else(|| not_found(id))?;
        Ok(entry.into())
    }

    pub fn image(&self, id: i64) -> Result<StoredImage> {
        let bytes = self.storage.get_image(id)?.ok_or_else(|| not_found(id))?;
        let mime_type = inspect_upload(&bytes)
            .map_or("application/octet-stream", |img| img.format.mime_type());
        Ok(StoredImage { bytes, mime_type })
    }

    pub fn thumbnail(&self, id: i64) -> Result<Vec<u8>> {
        let bytes = self.storage.get_image(id)?.ok_or_else(|| not_found(id))?;
        Ok(thumbnail_png(&bytes)?)
    }

    /// Share card for a sighting, stamped with `date`.
    pub fn share_card(&self, id: i64, date: NaiveDate) -> Result<Vec<u8>> {
        let observation = self.storage.get_observation(id)?.ok_or_else(|| not_found(id))?;
        let (entry, image) = observation.into_parts();
        let card = self.renderer.render(
            &image,
            &entry.cloud_name,
            entry.display_tier(),
            entry.display_score(),
            date,
        )?;
        Ok(card)
    }

    /// Snapshot of the whole database file.
    pub fn backup(&self) -> Result<Vec<u8>> {
        Ok(self.storage.backup_bytes()?)
    }
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::NotFound { entity: "observation", id: id.to_string() }
}

