//! Test utilities and module declarations for storage tests.

use crate::Storage;
use cloud_hunter_core::{NewObservation, Tier};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_observation(name: &str, score: i64, hash: &str) -> NewObservation {
    NewObservation {
        cloud_name: name.to_owned(),
        tier: Tier::N,
        score,
        science_fact: format!("{name} fact"),
        weather_tip: format!("{name} tip"),
        image_data: hash.as_bytes().to_vec(),
        image_hash: hash.to_owned(),
    }
}

mod observation_tests;
