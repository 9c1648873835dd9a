//! HTTP API server for the mala counter.

#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api_error;
mod api_types;
mod handlers;
mod response_types;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use mala_counter_core::{DEFAULT_BODY_LIMIT_BYTES, env_parse_with_default};
use mala_counter_service::{BackupService, CounterService};
use mala_counter_storage::SharedStore;

pub use api_types::ImageUploadRequest;
pub use response_types::{ImportResponse, MalaResponse, VersionResponse};

/// Runtime settings read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Settings {
    /// Largest accepted request body. Image uploads arrive as data URLs.
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES }
    }
}

impl Settings {
    /// Read `MALA_COUNTER_BODY_LIMIT_BYTES`, falling back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            body_limit_bytes: env_parse_with_default(
                "MALA_COUNTER_BODY_LIMIT_BYTES",
                DEFAULT_BODY_LIMIT_BYTES,
            ),
        }
    }
}

/// Shared application state for all HTTP handlers.
///
/// Holds the explicitly constructed store behind its services; nothing is
/// reached through a global.
pub struct AppState {
    /// Per-item updates, raw merges, image changes and resets
    pub counter_service: Arc<CounterService>,
    /// Export and import of backups
    pub backup_service: Arc<BackupService>,
    pub settings: Settings,
}

impl AppState {
    #[must_use]
    pub fn new(store: SharedStore, settings: Settings) -> Self {
        Self {
            counter_service: Arc::new(CounterService::new(Arc::clone(&store))),
            backup_service: Arc::new(BackupService::new(store)),
            settings,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.settings.body_limit_bytes;
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/items", get(handlers::items::list_items))
        .route("/api/mala", get(handlers::mala::get_mala).post(handlers::mala::update_mala))
        .route("/api/mala/reset", post(handlers::mala::reset_all))
        .route("/api/deityImage", post(handlers::images::upload_image))
        .route("/api/deityImage/{deity_id}", delete(handlers::images::clear_image))
        .route("/api/importData", post(handlers::backup::import_data))
        .route("/api/export/{format}", get(handlers::backup::export))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
