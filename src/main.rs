use std::path::PathBuf;
use std::sync::Arc;

use config::{Config, Environment as EnvironmentSource, File};
use tokio::net::TcpListener;

use voxsplit::application::ports::{MediaStore, SeparationEngine, TranscriptionEngine};
use voxsplit::application::services::{BundleService, TrackService};
use voxsplit::infrastructure::audio::{DemucsEngine, SpleeterEngine, TranscriptionEngineFactory};
use voxsplit::infrastructure::history::JsonHistoryRepository;
use voxsplit::infrastructure::observability::{init_tracing, TracingConfig};
use voxsplit::infrastructure::storage::LocalMediaStore;
use voxsplit::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let configuration = Config::builder()
        .add_source(
            File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
        )
        .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
        .build()?;
    let settings: Settings = configuration.try_deserialize()?;

    init_tracing(
        TracingConfig::new(environment, &settings.logging),
        settings.server.port,
    );

    let media_root = PathBuf::from(&settings.media.root_dir);
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(media_root.clone())?);
    let history = Arc::new(JsonHistoryRepository::new(
        PathBuf::from(&settings.media.history_file),
        settings.media.max_history,
    )?);

    let spleeter: Arc<dyn SeparationEngine> =
        Arc::new(SpleeterEngine::new(&settings.separation.spleeter_bin));
    let demucs: Arc<dyn SeparationEngine> = Arc::new(DemucsEngine::new(
        &settings.separation.demucs_bin,
        settings.separation.demucs_model.clone(),
    ));
    let transcriber: Arc<dyn TranscriptionEngine> =
        TranscriptionEngineFactory::create(&settings.transcription)?;

    let tracks = Arc::new(TrackService::new(
        Arc::clone(&history),
        Arc::clone(&media),
        spleeter,
        demucs,
        media_root,
    ));
    let bundles = Arc::new(BundleService::new(Arc::clone(&history), Arc::clone(&media)));

    let state = AppState {
        tracks,
        bundles,
        history,
        media,
        transcriber,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
