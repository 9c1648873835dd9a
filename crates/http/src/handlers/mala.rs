use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;
use std::sync::Arc;

use mala_counter_core::{CounterRecord, SparseFieldMap, UnknownKeys};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn get_mala(State(state): State<Arc<AppState>>) -> Result<Json<CounterRecord>, ApiError> {
    Ok(Json(state.counter_service.record().await?))
}

/// Merge a sparse update. Every key must be a recognized, client-writable field.
pub async fn update_mala(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CounterRecord>, ApiError> {
    let Json(body) = payload?;
    let partial = SparseFieldMap::from_json(&body, UnknownKeys::Reject)?;
    Ok(Json(state.counter_service.update(&partial).await?))
}

pub async fn reset_all(State(state): State<Arc<AppState>>) -> Result<Json<CounterRecord>, ApiError> {
    Ok(Json(state.counter_service.reset_all().await?))
}
