use axum::Json;

use mala_counter_core::{ItemDescriptor, TrackedItem};

pub async fn list_items() -> Json<Vec<&'static ItemDescriptor>> {
    Json(TrackedItem::ALL.into_iter().map(TrackedItem::descriptor).collect())
}
