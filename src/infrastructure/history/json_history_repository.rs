use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{HistoryError, HistoryRepository};
use crate::domain::{MediaPath, SeparationMethod, TrackId, TrackRecord, TrackStatus};

/// File-backed history store: one JSON array, most-recent-first, truncated
/// to `cap` on every save.
///
/// All mutations run under one async mutex, so the load-mutate-persist
/// cycle is serialized within the process and concurrent requests cannot
/// drop each other's updates. The file is replaced via write-to-temp plus
/// rename, so a crash mid-save never leaves a torn array behind.
pub struct JsonHistoryRepository {
    path: PathBuf,
    cap: usize,
    lock: Mutex<()>,
}

impl JsonHistoryRepository {
    pub fn new(path: PathBuf, cap: usize) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            cap,
            lock: Mutex::new(()),
        })
    }

    async fn load(&self) -> Result<Vec<TrackRecord>, HistoryError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, mut records: Vec<TrackRecord>) -> Result<(), HistoryError> {
        records.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        records.truncate(self.cap);

        let json = serde_json::to_vec_pretty(&records)?;
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, &json).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn append(&self, record: TrackRecord) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.push(record);
        self.persist(records).await
    }

    async fn list(&self) -> Result<Vec<TrackRecord>, HistoryError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn get(&self, id: TrackId) -> Result<Option<TrackRecord>, HistoryError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    async fn mark_processed(
        &self,
        id: TrackId,
        method: SeparationMethod,
        vocals_path: MediaPath,
        accompaniment_path: MediaPath,
    ) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(HistoryError::NotFound(id))?;

        record.status = TrackStatus::Processed;
        record.method = Some(method);
        record.vocals_path = Some(vocals_path);
        record.accompaniment_path = Some(accompaniment_path);

        self.persist(records).await
    }

    async fn clear(&self) -> Result<Vec<TrackRecord>, HistoryError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        self.persist(Vec::new()).await?;
        Ok(records)
    }
}
