use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{HistoryRepository, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    clear_history_handler, download_accompaniment_handler, download_all_handler,
    download_handler, download_vocals_handler, health_handler, history_handler, index_page,
    play_handler, process_handler, transcribe_handler, transcribe_page, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<H, T>(state: AppState<H, T>) -> Router
where
    H: HistoryRepository + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit =
        DefaultBodyLimit::max(state.settings.media.max_upload_mb * 1024 * 1024);
    let static_dir = state.settings.server.static_dir.clone();

    Router::new()
        .route("/", get(index_page::<H, T>))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler::<H, T>))
        .route("/process", post(process_handler::<H, T>))
        .route("/download/{*path}", get(download_handler::<H, T>))
        .route("/play/{*path}", get(play_handler::<H, T>))
        .route("/download-all", get(download_all_handler::<H, T>))
        .route("/download-vocals", get(download_vocals_handler::<H, T>))
        .route(
            "/download-accompaniment",
            get(download_accompaniment_handler::<H, T>),
        )
        .route("/clear-history", post(clear_history_handler::<H, T>))
        .route("/history", get(history_handler::<H, T>))
        .route(
            "/transcribe",
            get(transcribe_page::<H, T>).post(transcribe_handler::<H, T>),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
