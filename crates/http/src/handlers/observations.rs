use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use cloud_hunter_core::ObservationView;
use cloud_hunter_service::{RecordOutcome, UploadLookup};
use serde_json::{Value, json};

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::{blocking_json, blocking_result};
use crate::query_types::DeleteQuery;

/// Duplicate check for a raw image body. Never calls the classifier.
pub async fn lookup_upload(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UploadLookup>, ApiError> {
    let ledger = state.ledger.clone();
    blocking_json(move || ledger.lookup_upload(&body)).await
}

/// Classify and record a raw image body.
///
/// 201 with the new row, or 200 with the existing row for a duplicate.
pub async fn create_observation(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RecordOutcome>), ApiError> {
    let outcome = state.ledger.classify_upload(body.to_vec()).await?;
    let status = if outcome.is_duplicate() { StatusCode::OK } else { StatusCode::CREATED };
    Ok((status, Json(outcome)))
}

pub async fn get_observation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ObservationView>, ApiError> {
    let ledger = state.ledger.clone();
    blocking_json(move || ledger.observation(id)).await
}

/// Delete one observation. Requires `?confirm=true`; without it nothing is
/// touched and 428 is returned.
pub async fn delete_observation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    if !query.confirm {
        return Err(ApiError::PreconditionRequired(
            "删除需要二次确认：请附带 confirm=true".to_owned(),
        ));
    }
    let ledger = state.ledger.clone();
    blocking_result(move || ledger.delete_observation(id)).await?;
    Ok(Json(json!({"deleted": id})))
}
