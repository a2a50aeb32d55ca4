//! HTTP API server for cloud-hunter.

#![allow(clippy::missing_errors_doc, reason = "Handlers return ApiError")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api_error;
mod blocking;
mod handlers;
mod query_types;
mod viewer;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use cloud_hunter_service::LedgerService;
use tower_http::trace::TraceLayer;

pub use api_error::ApiError;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub ledger: LedgerService,
}

impl AppState {
    #[must_use]
    pub const fn new(ledger: LedgerService) -> Self {
        Self { ledger }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(viewer::serve_viewer))
        .route("/health", get(health))
        .route("/api/dashboard", get(handlers::collection::dashboard))
        .route("/api/gallery", get(handlers::collection::gallery))
        .route("/api/species/{name}", get(handlers::collection::species_history))
        .route("/api/uploads/lookup", post(handlers::observations::lookup_upload))
        .route("/api/observations", post(handlers::observations::create_observation))
        .route(
            "/api/observations/{id}",
            get(handlers::observations::get_observation)
                .delete(handlers::observations::delete_observation),
        )
        .route("/api/observations/{id}/image", get(handlers::media::image))
        .route("/api/observations/{id}/thumbnail", get(handlers::media::thumbnail))
        .route("/api/observations/{id}/card", get(handlers::media::share_card))
        .route("/api/repair", post(handlers::admin::repair))
        .route("/api/backup", get(handlers::admin::backup))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
