use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
};
use std::sync::Arc;

use mala_counter_core::TrackedItem;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::ImageUploadRequest;
use crate::response_types::MalaResponse;

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ImageUploadRequest>, JsonRejection>,
) -> Result<Json<MalaResponse>, ApiError> {
    let Json(req) = payload?;
    let item: TrackedItem = req.deity_id.parse()?;
    let mala = state.counter_service.set_image(item, &req.image_data_url).await?;
    Ok(Json(MalaResponse { success: true, mala }))
}

pub async fn clear_image(
    State(state): State<Arc<AppState>>,
    Path(deity_id): Path<String>,
) -> Result<Json<MalaResponse>, ApiError> {
    let item: TrackedItem = deity_id.parse()?;
    let mala = state.counter_service.clear_image(item).await?;
    Ok(Json(MalaResponse { success: true, mala }))
}
