use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::application::ports::{HistoryRepository, TranscriptionEngine};
use crate::application::services::TrackError;
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub unique_id: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<H, T>(
    State(state): State<AppState<H, T>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    let mut upload: Option<(String, Bytes)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!("Failed to read multipart: {}", e))),
                )
                    .into_response();
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("No selected file")),
                )
                    .into_response();
            }
        };

        match field.bytes().await {
            Ok(data) => upload = Some((filename, data)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!("Failed to read file: {}", e))),
                )
                    .into_response();
            }
        }
    }

    let Some((filename, data)) = upload else {
        tracing::warn!("Upload request with no file part");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No file part")),
        )
            .into_response();
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "Processing file upload");

    match state.tracks.register_upload(&filename, data).await {
        Ok(record) => (
            StatusCode::OK,
            Json(UploadResponse {
                success: true,
                filename: record.original_name,
                unique_id: record.id.to_string(),
            }),
        )
            .into_response(),
        Err(TrackError::UnsupportedFormat(_)) | Err(TrackError::InvalidFilename(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid file type")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to register upload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Upload failed")),
            )
                .into_response()
        }
    }
}
