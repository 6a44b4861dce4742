use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::ports::{HistoryRepository, TranscriptionEngine};
use crate::application::services::{BundleError, StemSelection};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[tracing::instrument(skip(state))]
pub async fn download_all_handler<H, T>(State(state): State<AppState<H, T>>) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    bundle_response(&state, StemSelection::Both, "all_separated_tracks.zip").await
}

#[tracing::instrument(skip(state))]
pub async fn download_vocals_handler<H, T>(
    State(state): State<AppState<H, T>>,
) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    bundle_response(&state, StemSelection::Vocals, "all_vocals.zip").await
}

#[tracing::instrument(skip(state))]
pub async fn download_accompaniment_handler<H, T>(
    State(state): State<AppState<H, T>>,
) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    bundle_response(&state, StemSelection::Accompaniment, "all_accompaniment.zip").await
}

async fn bundle_response<H, T>(
    state: &AppState<H, T>,
    selection: StemSelection,
    download_name: &str,
) -> axum::response::Response
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    match state.bundles.build(selection).await {
        Ok(archive) => {
            tracing::info!(bytes = archive.len(), name = download_name, "Bundle built");
            (
                [
                    (header::CONTENT_TYPE, "application/zip".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", download_name),
                    ),
                ],
                archive,
            )
                .into_response()
        }
        Err(BundleError::Empty) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No files to download")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build bundle");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to build archive")),
            )
                .into_response()
        }
    }
}
