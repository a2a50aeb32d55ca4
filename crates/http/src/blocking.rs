//! Helpers for running blocking ledger operations in async handlers.
//!
//! Spawns the closure on the blocking pool, maps join failures to a 500 and
//! ledger failures through [`ApiError`].

use axum::Json;
use cloud_hunter_service::ServiceError;
use serde::Serialize;
use tokio::task::spawn_blocking;

use crate::api_error::ApiError;

/// Runs a blocking closure and returns `Result<Json<T>, ApiError>`.
///
/// # Example
/// ```ignore
/// pub async fn gallery(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TierShelf>>, ApiError> {
///     let ledger = state.ledger.clone();
///     blocking_json(move || ledger.gallery()).await
/// }
/// ```
pub async fn blocking_json<T, F>(f: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static + Serialize,
{
    blocking_result(f).await.map(Json)
}

/// Runs a blocking closure and returns the raw value.
pub async fn blocking_result<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("join error: {e}")))?
        .map_err(ApiError::from)
}
