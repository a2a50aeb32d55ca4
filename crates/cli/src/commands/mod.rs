pub(crate) mod ledger;
pub(crate) mod serve;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use cloud_hunter_core::Classification;
use cloud_hunter_imaging::{ShareCardRenderer, discover_font};
use cloud_hunter_llm::{CloudClassifier, LlmError};
use cloud_hunter_service::LedgerService;
use cloud_hunter_storage::Storage;

use crate::{build_classifier, ensure_db_dir, get_db_path};

/// Stand-in for commands that never classify, so they run without an API key.
struct ClassifierNotConfigured;

#[async_trait]
impl CloudClassifier for ClassifierNotConfigured {
    async fn classify(&self, _image: &[u8], _mime_type: &str) -> Result<Classification, LlmError> {
        Err(LlmError::ClientInit("GEMINI_API_KEY is not set".to_owned()))
    }
}

/// Open the ledger at the configured database path.
pub(crate) fn open_ledger(with_classifier: bool) -> Result<LedgerService> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let storage = Arc::new(Storage::new(&db_path)?);

    let classifier: Arc<dyn CloudClassifier> = if with_classifier {
        Arc::new(build_classifier()?)
    } else {
        Arc::new(ClassifierNotConfigured)
    };
    let renderer = Arc::new(ShareCardRenderer::new(discover_font()));
    Ok(LedgerService::new(storage, classifier, renderer))
}
