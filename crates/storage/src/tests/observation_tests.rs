#![expect(clippy::unwrap_used, reason = "test code")]

use super::{create_test_observation, create_test_storage};
use crate::{SCHEMA_VERSION, Storage, StorageError};

#[test]
fn test_storage_new() {
    let (storage, _temp_dir) = create_test_storage();
    assert_eq!(storage.count_observations().unwrap(), 0);
    assert!(storage.list_entries().unwrap().is_empty());
}

#[test]
fn test_reopen_keeps_rows_and_schema_version() {
    let (storage, temp_dir) = create_test_storage();
    storage.insert_observation(&create_test_observation("积云", 10, "h1")).unwrap();
    drop(storage);

    let reopened = Storage::new(&temp_dir.path().join("test.db")).unwrap();
    assert_eq!(reopened.count_observations().unwrap(), 1);
    let conn = reopened.pool.get().unwrap();
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0)).unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn test_insert_and_read_back() {
    let (storage, _temp_dir) = create_test_storage();
    let mut obs = create_test_observation("夜光云", 45, "abc");
    obs.tier = cloud_hunter_core::Tier::SSR;

    let id = storage.insert_observation(&obs).unwrap().unwrap();
    let full = storage.get_observation(id).unwrap().unwrap();
    assert_eq!(full.entry.cloud_name, "夜光云");
    assert_eq!(full.entry.tier, cloud_hunter_core::Tier::SSR);
    assert_eq!(full.entry.score, 45);
    assert_eq!(full.entry.science_fact, "夜光云 fact");
    assert_eq!(full.image_data, b"abc".to_vec());

    let by_hash = storage.get_entry_by_hash("abc").unwrap().unwrap();
    assert_eq!(by_hash.id, id);
    assert_eq!(storage.get_image(id).unwrap().unwrap(), b"abc".to_vec());
}

#[test]
fn test_same_fingerprint_is_rejected() {
    let (storage, _temp_dir) = create_test_storage();
    let first = storage.insert_observation(&create_test_observation("积云", 10, "same")).unwrap();
    assert!(first.is_some());

    let second = storage.insert_observation(&create_test_observation("层云", 10, "same")).unwrap();
    assert!(second.is_none());
    assert_eq!(storage.count_observations().unwrap(), 1);
    assert_eq!(storage.get_entry_by_hash("same").unwrap().unwrap().cloud_name, "积云");
}

#[test]
fn test_ids_are_monotonic() {
    let (storage, _temp_dir) = create_test_storage();
    let a = storage.insert_observation(&create_test_observation("积云", 10, "a")).unwrap().unwrap();
    let b = storage.insert_observation(&create_test_observation("积云", 0, "b")).unwrap().unwrap();
    storage.delete_observation(b).unwrap();
    let c = storage.insert_observation(&create_test_observation("积云", 0, "c")).unwrap().unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_species_seen_is_exact_match() {
    let (storage, _temp_dir) = create_test_storage();
    storage.insert_observation(&create_test_observation("浓积云", 20, "x")).unwrap();
    assert!(storage.species_seen("浓积云").unwrap());
    assert!(!storage.species_seen("积云").unwrap());
}

#[test]
fn test_list_and_species_entries_are_newest_first() {
    let (storage, _temp_dir) = create_test_storage();
    for (i, name) in ["积云", "彩虹", "积云"].iter().enumerate() {
        storage.insert_observation(&create_test_observation(name, 10, &format!("h{i}"))).unwrap();
    }
    let all = storage.list_entries().unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].id > w[1].id));

    let cumulus = storage.species_entries("积云").unwrap();
    assert_eq!(cumulus.len(), 2);
    assert_eq!(cumulus[0].image_hash, "h2");
}

#[test]
fn test_delete_removes_only_that_row() {
    let (storage, _temp_dir) = create_test_storage();
    let keep = storage.insert_observation(&create_test_observation("积云", 10, "k")).unwrap().unwrap();
    let gone = storage.insert_observation(&create_test_observation("彩虹", 35, "g")).unwrap().unwrap();

    storage.delete_observation(gone).unwrap();

    assert!(storage.get_entry(gone).unwrap().is_none());
    assert!(storage.get_entry(keep).unwrap().is_some());
    assert_eq!(storage.count_observations().unwrap(), 1);
}

#[test]
fn test_delete_missing_id_is_not_found() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.delete_observation(404).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[test]
fn test_legacy_rows_are_readable() {
    let (storage, _temp_dir) = create_test_storage();
    let conn = storage.pool.get().unwrap();
    conn.execute(
        "INSERT INTO history (cloud_name, tier, score, science_fact, weather_tip, image_data, image_hash, timestamp)
         VALUES ('积云', 'sr  (rare)', NULL, NULL, NULL, NULL, 'legacy', '2024-05-01 08:30:00')",
        [],
    )
    .unwrap();
    drop(conn);

    let entry = storage.get_entry_by_hash("legacy").unwrap().unwrap();
    assert_eq!(entry.tier, cloud_hunter_core::Tier::SR);
    assert_eq!(entry.score, 0);
    assert_eq!(entry.science_fact, "");
    assert_eq!(entry.created_at.to_rfc3339(), "2024-05-01T08:30:00+00:00");
    assert_eq!(storage.get_image(entry.id).unwrap().unwrap(), Vec::<u8>::new());
}
