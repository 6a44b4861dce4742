use std::path::Path;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;

use crate::application::ports::{HistoryRepository, TranscriptionEngine};
use crate::presentation::state::AppState;

use super::ErrorResponse;

pub async fn index_page<H, T>(State(state): State<AppState<H, T>>) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    serve_page(&state.settings.server.static_dir, "index.html").await
}

pub async fn transcribe_page<H, T>(State(state): State<AppState<H, T>>) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    serve_page(&state.settings.server.static_dir, "transcribe.html").await
}

async fn serve_page(static_dir: &str, page: &str) -> axum::response::Response {
    let path = Path::new(static_dir).join(page);
    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => Html(contents).into_response(),
        Err(e) => {
            tracing::error!(page = %path.display(), error = %e, "Failed to read page asset");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Page asset missing")),
            )
                .into_response()
        }
    }
}
