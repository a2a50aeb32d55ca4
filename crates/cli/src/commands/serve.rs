use std::sync::Arc;

use anyhow::Result;
use cloud_hunter_http::{AppState, create_router};

use super::open_ledger;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let ledger = open_ledger(true)?;
    let state = Arc::new(AppState::new(ledger));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
