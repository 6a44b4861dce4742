use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{HistoryRepository, TranscriptionEngine};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
}

#[tracing::instrument(skip(state))]
pub async fn history_handler<H, T>(State(state): State<AppState<H, T>>) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    match state.history.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load history");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load history")),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn clear_history_handler<H, T>(State(state): State<AppState<H, T>>) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    match state.tracks.clear_library().await {
        Ok(cleared) => {
            tracing::info!(cleared, "History cleared via API");
            (StatusCode::OK, Json(ClearHistoryResponse { success: true })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to clear history");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to clear history")),
            )
                .into_response()
        }
    }
}
