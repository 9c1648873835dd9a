use anyhow::Result;
use mala_counter_http::{AppState, Settings, create_router};
use mala_counter_storage::{CounterStore, MemStorage};
use std::sync::Arc;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let store = Arc::new(MemStorage::new());
    // Counters start from zero on every process start.
    store.reset_all().await?;

    let settings = Settings::from_env();
    tracing::info!(body_limit_bytes = settings.body_limit_bytes, "Request body limit configured");

    let state = Arc::new(AppState::new(store, settings));
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
