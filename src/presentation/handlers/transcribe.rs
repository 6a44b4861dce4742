use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::application::ports::{HistoryRepository, TranscriptionEngine};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<H, T>(
    State(state): State<AppState<H, T>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    let mut clip: Option<(String, Bytes)> = None;
    let mut language: Option<String> = None;

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

        match field.name() {
            Some("file") => {
                let filename = match field.file_name() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse::new("No file selected")),
                        )
                            .into_response();
                    }
                };
                match field.bytes().await {
                    Ok(data) => clip = Some((filename, data)),
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
            Some("language") => {
                language = field.text().await.ok();
            }
            _ => {}
        }
    }

    let Some((filename, data)) = clip else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No file provided")),
        )
            .into_response();
    };

    // "auto" (or an empty selection) means autodetect.
    let language = language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != "auto");

    tracing::debug!(filename = %filename, bytes = data.len(), language = ?language, "Transcribing clip");

    match state
        .transcriber
        .transcribe(&data, &filename, language)
        .await
    {
        Ok(text) => (StatusCode::OK, Json(TranscribeResponse { text })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Transcription failed: {}", e))),
            )
                .into_response()
        }
    }
}
