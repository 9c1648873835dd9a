use axum::{
    Json,
    body::Bytes,
    extract::rejection::BytesRejection,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;

use mala_counter_service::{ExportFormat, ImportOutcome, ServiceError};

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::ImportResponse;

const NOTHING_TO_IMPORT: &str = "No valid mala data found in the import";

/// Import a structured backup. The raw body is parsed here so malformed text,
/// including bytes that are not UTF-8 and oversized bodies, gets the same
/// `{success: false, message}` shape as an empty import.
pub async fn import_data(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ImportResponse>), ApiError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), "rejected backup body");
            return Ok((rejection.status(), Json(ImportResponse::failed(rejection.body_text()))));
        },
    };
    match state.backup_service.import(&body).await {
        Ok(ImportOutcome::Imported { record, fields }) => Ok((
            StatusCode::OK,
            Json(ImportResponse {
                success: true,
                mala: Some(record),
                imported: fields.into_iter().map(str::to_owned).collect(),
                message: None,
            }),
        )),
        Ok(ImportOutcome::NothingToImport) => {
            Ok((StatusCode::BAD_REQUEST, Json(ImportResponse::failed(NOTHING_TO_IMPORT))))
        },
        Err(ServiceError::Import(e)) => {
            Ok((StatusCode::BAD_REQUEST, Json(ImportResponse::failed(e.to_string()))))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn export(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let format: ExportFormat = format.parse().map_err(ApiError::NotFound)?;
    let now = Utc::now();
    let bytes = state.backup_service.export(format, now).await?;
    let disposition = format!("attachment; filename=\"{}\"", format.file_name(now.date_naive()));
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
