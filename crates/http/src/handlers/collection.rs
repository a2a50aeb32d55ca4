use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use cloud_hunter_core::{ObservationView, TierShelf};
use cloud_hunter_service::Dashboard;

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_json;

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<Dashboard>, ApiError> {
    let ledger = state.ledger.clone();
    blocking_json(move || ledger.dashboard()).await
}

pub async fn gallery(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TierShelf>>, ApiError> {
    let ledger = state.ledger.clone();
    blocking_json(move || ledger.gallery()).await
}

pub async fn species_history(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ObservationView>>, ApiError> {
    let ledger = state.ledger.clone();
    blocking_json(move || ledger.species_history(&name)).await
}
