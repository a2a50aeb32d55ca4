use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{Local, NaiveDate};

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_result;
use crate::query_types::CardQuery;

const PNG: &str = "image/png";

pub async fn image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let ledger = state.ledger.clone();
    let stored = blocking_result(move || ledger.image(id)).await?;
    Ok(([(header::CONTENT_TYPE, stored.mime_type)], stored.bytes).into_response())
}

pub async fn thumbnail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let ledger = state.ledger.clone();
    let png = blocking_result(move || ledger.thumbnail(id)).await?;
    Ok(([(header::CONTENT_TYPE, PNG)], png).into_response())
}

/// Share card as a PNG download.
pub async fn share_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<CardQuery>,
) -> Result<Response, ApiError> {
    let date = match query.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| ApiError::BadRequest(format!("invalid date '{raw}': {e}")))?,
        None => Local::now().date_naive(),
    };
    let ledger = state.ledger.clone();
    let png = blocking_result(move || ledger.share_card(id, date)).await?;
    let disposition = format!("attachment; filename=\"cloud_card_{id}.png\"");
    Ok(([(header::CONTENT_TYPE, PNG.to_owned()), (header::CONTENT_DISPOSITION, disposition)], png)
        .into_response())
}
