#![expect(clippy::unwrap_used, reason = "test code")]

use chrono::NaiveDate;
use cloud_hunter_core::{MAX_POSSIBLE_SCORE, NewObservation, Tier};

use super::{create_test_ledger, sky_png};
use crate::fingerprint;

fn legacy_row(name: &str, tier: Tier, score: i64, seed: u8) -> NewObservation {
    let image_data = sky_png(seed);
    NewObservation {
        cloud_name: name.to_owned(),
        tier,
        score,
        science_fact: String::new(),
        weather_tip: String::new(),
        image_hash: fingerprint(&image_data),
        image_data,
    }
}

#[test]
fn test_repair_is_idempotent() {
    let h = create_test_ledger();
    let storage = h.ledger.storage();
    storage.insert_observation(&legacy_row("夜光云", Tier::UR, 90, 1)).unwrap();
    storage.insert_observation(&legacy_row("积云", Tier::R, 10, 2)).unwrap();
    storage.insert_observation(&legacy_row("积云", Tier::N, 0, 3)).unwrap();
    storage.insert_observation(&legacy_row("彩虹", Tier::SR, 35, 4)).unwrap();

    let first = h.ledger.repair_all().unwrap();
    assert_eq!(first.changed, 2);
    assert_eq!(first.message(), "已修复 2 条数据");

    let second = h.ledger.repair_all().unwrap();
    assert!(second.is_noop());
    assert_eq!(second.message(), "数据正常");

    let rows = h.ledger.species_history("夜光云").unwrap();
    assert_eq!(rows[0].entry.score, 45);
    assert_eq!(rows[0].entry.tier, Tier::SSR);
    let cumulus = h.ledger.species_history("积云").unwrap();
    assert!(cumulus.iter().any(|r| r.entry.score == 0));
}

#[tokio::test]
async fn test_dashboard_reflects_collection() {
    let h = create_test_ledger();
    let empty = h.ledger.dashboard().unwrap();
    assert_eq!(empty.total_score, 0);
    assert_eq!(empty.rank.progress, 0.0);
    assert_eq!(empty.max_possible_score, MAX_POSSIBLE_SCORE);
    assert_eq!(empty.canonical_species, 42);
    assert!(empty.achievements.iter().all(|a| !a.unlocked));

    h.classifier.cloud("积云", 10);
    h.classifier.cloud("层云", 10);
    h.ledger.classify_upload(sky_png(1)).await.unwrap();
    h.ledger.classify_upload(sky_png(2)).await.unwrap();

    let dash = h.ledger.dashboard().unwrap();
    assert_eq!(dash.total_score, 20);
    assert_eq!(dash.unique_species, 2);
    assert_eq!(dash.tier_counts.n, 2);
    assert!(dash.next_description.contains("还需 48 分"));
    let starter = dash.achievements.iter().find(|a| a.name.contains("萌新")).unwrap();
    assert!(starter.unlocked);
}

#[tokio::test]
async fn test_gallery_groups_by_tier_then_species() {
    let h = create_test_ledger();
    h.classifier.cloud("珠母云", 10);
    h.classifier.cloud("积云", 10);
    h.classifier.cloud("珠母云", 10);
    for seed in 1..=3 {
        h.ledger.classify_upload(sky_png(seed)).await.unwrap();
    }

    let gallery = h.ledger.gallery().unwrap();
    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0].tier, Tier::UR);
    assert_eq!(gallery[0].species[0].records.len(), 2);
    assert_eq!(gallery[1].tier, Tier::N);

    let history = h.ledger.species_history("珠母云").unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].entry.id > history[1].entry.id);
    assert!(h.ledger.species_history("从没见过").unwrap().is_empty());
}

#[tokio::test]
async fn test_image_thumbnail_and_card() {
    let h = create_test_ledger();
    h.classifier.cloud("彩虹", 10);
    let bytes = sky_png(9);
    let outcome = h.ledger.classify_upload(bytes.clone()).await.unwrap();
    let id = outcome.observation().entry.id;

    let stored = h.ledger.image(id).unwrap();
    assert_eq!(stored.bytes, bytes);
    assert_eq!(stored.mime_type, "image/png");

    let thumb = image::load_from_memory(&h.ledger.thumbnail(id).unwrap()).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (300, 300));

    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let card = image::load_from_memory(&h.ledger.share_card(id, date).unwrap()).unwrap();
    assert_eq!(card.width(), 1000);

    assert!(h.ledger.image(9999).unwrap_err().is_not_found());
    assert!(h.ledger.share_card(9999, date).unwrap_err().is_not_found());
}

#[test]
fn test_backup_contains_database() {
    let h = create_test_ledger();
    let bytes = h.ledger.backup().unwrap();
    assert!(bytes.starts_with(b"SQLite format 3\0"));
}
