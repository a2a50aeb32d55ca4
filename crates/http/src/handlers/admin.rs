use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Local;
use serde_json::{Value, json};

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_result;

/// Run the repair pass. A no-op is reported as a notice, not an error.
pub async fn repair(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let ledger = state.ledger.clone();
    let report = blocking_result(move || ledger.repair_all()).await?;
    Ok(Json(json!({"changed": report.changed, "message": report.message()})))
}

/// Download a consistent copy of the database file.
pub async fn backup(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let ledger = state.ledger.clone();
    let bytes = blocking_result(move || ledger.backup()).await?;
    let disposition = format!(
        "attachment; filename=\"cloud_collection_{}.db\"",
        Local::now().format("%Y%m%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/vnd.sqlite3".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
