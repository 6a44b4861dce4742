use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    HistoryError, HistoryRepository, MediaStore, MediaStoreError, SeparationEngine,
    SeparationError,
};
use crate::domain::{
    AudioFormat, MediaPath, MediaPathError, SeparationMethod, TrackId, TrackRecord,
};

/// Upload bookkeeping and separation dispatch: stores raw uploads, routes a
/// processing request to the engine selected by the caller, and records the
/// resulting stem paths in the history.
pub struct TrackService<H: HistoryRepository> {
    history: Arc<H>,
    media: Arc<dyn MediaStore>,
    spleeter: Arc<dyn SeparationEngine>,
    demucs: Arc<dyn SeparationEngine>,
    media_root: PathBuf,
}

impl<H: HistoryRepository> TrackService<H> {
    pub fn new(
        history: Arc<H>,
        media: Arc<dyn MediaStore>,
        spleeter: Arc<dyn SeparationEngine>,
        demucs: Arc<dyn SeparationEngine>,
        media_root: PathBuf,
    ) -> Self {
        Self {
            history,
            media,
            spleeter,
            demucs,
            media_root,
        }
    }

    /// Validate, store and register one upload. No history record is
    /// created when validation fails.
    pub async fn register_upload(
        &self,
        original_name: &str,
        data: Bytes,
    ) -> Result<TrackRecord, TrackError> {
        let filename = sanitize_filename(original_name)
            .ok_or_else(|| TrackError::InvalidFilename(original_name.to_string()))?;

        if AudioFormat::from_filename(&filename).is_none() {
            return Err(TrackError::UnsupportedFormat(filename));
        }

        let record = TrackRecord::new(TrackId::new(), filename);
        let upload_path = MediaPath::parse(record.upload_path())?;

        self.media.store(&upload_path, data).await?;
        self.history.append(record.clone()).await?;

        tracing::info!(
            track_id = %record.id,
            filename = %record.original_name,
            "Upload registered"
        );

        Ok(record)
    }

    /// Run the selected engine against a previously uploaded file and
    /// record the stem paths. Returns the relative paths of both stems.
    pub async fn process(
        &self,
        id: TrackId,
        original_name: &str,
        method: SeparationMethod,
    ) -> Result<(MediaPath, MediaPath), TrackError> {
        let filename = sanitize_filename(original_name)
            .ok_or_else(|| TrackError::InvalidFilename(original_name.to_string()))?;

        if self.history.get(id).await?.is_none() {
            return Err(TrackError::UnknownTrack(id));
        }

        let upload_path = MediaPath::parse(format!("{}_{}", id, filename))?;
        if !self.media.exists(&upload_path).await? {
            return Err(TrackError::InputMissing(upload_path.to_string()));
        }

        let input = self.media_root.join(upload_path.as_str());
        let output_dir = self.media_root.join(id.to_string());

        let engine = match method {
            SeparationMethod::Spleeter => &self.spleeter,
            SeparationMethod::Demucs => &self.demucs,
        };

        tracing::info!(track_id = %id, method = %method, "Starting separation");
        let stems = engine.separate(&input, &output_dir).await?;

        let vocals = relative_stem_path(id, &stems.vocals)?;
        let accompaniment = relative_stem_path(id, &stems.accompaniment)?;

        self.history
            .mark_processed(id, method, vocals.clone(), accompaniment.clone())
            .await?;

        tracing::info!(
            track_id = %id,
            vocals = %vocals,
            accompaniment = %accompaniment,
            "Separation completed"
        );

        Ok((vocals, accompaniment))
    }

    /// Delete every file referenced by every record and reset the store.
    /// Returns the number of records that were cleared.
    pub async fn clear_library(&self) -> Result<usize, TrackError> {
        let records = self.history.clear().await?;

        for record in &records {
            if let Ok(path) = MediaPath::parse(record.upload_path()) {
                self.delete_quiet(&path).await;
            }
            if let Some(path) = &record.vocals_path {
                self.delete_quiet(path).await;
            }
            if let Some(path) = &record.accompaniment_path {
                self.delete_quiet(path).await;
            }
        }

        tracing::info!(cleared = records.len(), "History cleared");
        Ok(records.len())
    }

    async fn delete_quiet(&self, path: &MediaPath) {
        match self.media.delete(path).await {
            Ok(()) | Err(MediaStoreError::NotFound(_)) => {}
            Err(e) => tracing::warn!(path = %path, error = %e, "Failed to delete media file"),
        }
    }
}

/// Strip any directory components a client smuggled into the filename.
fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

fn relative_stem_path(id: TrackId, absolute: &std::path::Path) -> Result<MediaPath, TrackError> {
    let filename = absolute
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .ok_or_else(|| TrackError::InvalidFilename(absolute.display().to_string()))?;
    Ok(MediaPath::scoped(&id, &filename)?)
}

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("unknown track: {0}")]
    UnknownTrack(TrackId),
    #[error("uploaded file missing: {0}")]
    InputMissing(String),
    #[error("separation: {0}")]
    Separation(#[from] SeparationError),
    #[error("history: {0}")]
    History(#[from] HistoryError),
    #[error("media: {0}")]
    Media(#[from] MediaStoreError),
    #[error("media path: {0}")]
    Path(#[from] MediaPathError),
}
