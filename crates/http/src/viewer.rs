//! Web UI: embedded single-page app served at `/`.
//!
//! Upload with duplicate check, tiered gallery, per-species history with
//! confirmed delete, data repair and a rank/achievement sidebar.

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

/// Embedded HTML for the viewer UI
pub const VIEWER_HTML: &str = include_str!("viewer.html");

/// Serve the viewer HTML page
pub async fn serve_viewer() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], Html(VIEWER_HTML))
        .into_response()
}
