//! Ledger tests against a real temp database and a scripted classifier.

#![expect(clippy::unwrap_used, reason = "test code")]

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloud_hunter_core::Classification;
use cloud_hunter_imaging::ShareCardRenderer;
use cloud_hunter_llm::{CloudClassifier, LlmError};
use cloud_hunter_storage::Storage;
use image::{ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

use crate::LedgerService;

mod query_tests;

/// Classifier that replays queued answers and counts calls.
#[derive(Default)]
pub struct ScriptedClassifier {
    answers: Mutex<VecDeque<Result<Classification, LlmError>>>,
    calls: Mutex<usize>,
}

impl ScriptedClassifier {
    pub fn push(&self, answer: Result<Classification, LlmError>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn cloud(&self, name: &str, suggested: i64) {
        self.push(Ok(cloud(name, suggested)));
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CloudClassifier for ScriptedClassifier {
    async fn classify(&self, _image: &[u8], _mime_type: &str) -> Result<Classification, LlmError> {
        *self.calls.lock().unwrap() += 1;
        self.answers.lock().unwrap().pop_front().unwrap_or(Err(LlmError::EmptyResponse))
    }
}

pub fn cloud(name: &str, suggested: i64) -> Classification {
    Classification {
        is_cloud: true,
        cloud_name: name.to_owned(),
        score_suggestion: suggested,
        science_fact: format!("{name} 科普"),
        weather_tip: format!("{name} 预告"),
    }
}

pub struct Harness {
    pub ledger: LedgerService,
    pub classifier: Arc<ScriptedClassifier>,
    _temp_dir: TempDir,
}

pub fn create_test_ledger() -> Harness {
    create_test_ledger_at(TempDir::new().unwrap())
}

/// Ledger over `temp_dir/clouds.db`, which may already hold data.
pub fn create_test_ledger_at(temp_dir: TempDir) -> Harness {
    let storage = Arc::new(Storage::new(&temp_dir.path().join("clouds.db")).unwrap());
    let classifier = Arc::new(ScriptedClassifier::default());
    let ledger = LedgerService::new(
        storage,
        Arc::clone(&classifier) as Arc<dyn CloudClassifier>,
        Arc::new(ShareCardRenderer::new(None)),
    );
    Harness { ledger, classifier, _temp_dir: temp_dir }
}

/// Distinct, decodable PNG per `seed`.
pub fn sky_png(seed: u8) -> Vec<u8> {
    let img = RgbImage::from_fn(48, 32, |x, y| {
        Rgb([seed, (x as u8).wrapping_mul(7) ^ seed, (y as u8).wrapping_mul(13)])
    });
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
    out
}
