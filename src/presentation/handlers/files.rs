use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::ports::{HistoryRepository, MediaStoreError, TranscriptionEngine};
use crate::domain::{playback_mime, MediaPath};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[tracing::instrument(skip(state))]
pub async fn download_handler<H, T>(
    State(state): State<AppState<H, T>>,
    Path(path): Path<String>,
) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    serve_file(&state, &path, Disposition::Attachment).await
}

#[tracing::instrument(skip(state))]
pub async fn play_handler<H, T>(
    State(state): State<AppState<H, T>>,
    Path(path): Path<String>,
) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    serve_file(&state, &path, Disposition::Inline).await
}

enum Disposition {
    Attachment,
    Inline,
}

async fn serve_file<H, T>(
    state: &AppState<H, T>,
    raw_path: &str,
    disposition: Disposition,
) -> axum::response::Response
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    let path = match MediaPath::parse(raw_path) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(path = %raw_path, error = %e, "Rejected media path");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid file path")),
            )
                .into_response();
        }
    };

    match state.media.fetch(&path).await {
        Ok(data) => {
            let filename = path
                .as_str()
                .rsplit('/')
                .next()
                .unwrap_or(path.as_str())
                .to_string();
            let headers = match disposition {
                Disposition::Attachment => [
                    (
                        header::CONTENT_TYPE,
                        "application/octet-stream".to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                Disposition::Inline => [
                    (header::CONTENT_TYPE, playback_mime(&filename).to_string()),
                    (header::CONTENT_DISPOSITION, "inline".to_string()),
                ],
            };
            (headers, data).into_response()
        }
        Err(MediaStoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("File not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read media file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to read file")),
            )
                .into_response()
        }
    }
}
