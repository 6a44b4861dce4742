use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{HistoryRepository, TranscriptionEngine};
use crate::application::services::TrackError;
use crate::domain::{SeparationMethod, TrackId};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Deserialize)]
pub struct ProcessRequest {
    pub filename: String,
    pub unique_id: String,
    pub method: String,
}

#[derive(Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub vocals_path: String,
    pub accompaniment_path: String,
}

#[tracing::instrument(skip(state, request), fields(unique_id = %request.unique_id, method = %request.method))]
pub async fn process_handler<H, T>(
    State(state): State<AppState<H, T>>,
    Json(request): Json<ProcessRequest>,
) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    let track_id = match Uuid::parse_str(&request.unique_id) {
        Ok(uuid) => TrackId::from_uuid(uuid),
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Invalid track id: {}",
                    request.unique_id
                ))),
            )
                .into_response();
        }
    };

    let method: SeparationMethod = match request.method.parse() {
        Ok(method) => method,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid separation method")),
            )
                .into_response();
        }
    };

    match state
        .tracks
        .process(track_id, &request.filename, method)
        .await
    {
        Ok((vocals, accompaniment)) => (
            StatusCode::OK,
            Json(ProcessResponse {
                success: true,
                vocals_path: vocals.to_string(),
                accompaniment_path: accompaniment.to_string(),
            }),
        )
            .into_response(),
        Err(TrackError::UnknownTrack(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Unknown track: {}", id))),
        )
            .into_response(),
        Err(TrackError::InputMissing(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("File not found")),
        )
            .into_response(),
        Err(TrackError::InvalidFilename(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid filename")),
        )
            .into_response(),
        Err(TrackError::Separation(e)) => {
            tracing::error!(error = %e, "Separation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Processing failed: {}", e))),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to process track");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Processing failed")),
            )
                .into_response()
        }
    }
}
