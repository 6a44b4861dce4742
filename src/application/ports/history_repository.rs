use async_trait::async_trait;

use crate::domain::{MediaPath, SeparationMethod, TrackId, TrackRecord};

/// Persisted upload history, most-recent-first and capped.
///
/// Every method is a whole read-modify-write cycle owned by the
/// implementation; callers never load and save halves of the store, so
/// concurrent requests cannot drop each other's updates.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Insert a new record. The store is re-sorted by descending upload
    /// date and truncated to its cap before persisting.
    async fn append(&self, record: TrackRecord) -> Result<(), HistoryError>;

    /// Full ordered sequence, most recent first. Empty if the backing file
    /// does not exist yet.
    async fn list(&self) -> Result<Vec<TrackRecord>, HistoryError>;

    async fn get(&self, id: TrackId) -> Result<Option<TrackRecord>, HistoryError>;

    /// Transition the record to processed and attach the stem paths.
    /// Errors if the id is unknown (e.g. already evicted by the cap).
    async fn mark_processed(
        &self,
        id: TrackId,
        method: SeparationMethod,
        vocals_path: MediaPath,
        accompaniment_path: MediaPath,
    ) -> Result<(), HistoryError>;

    /// Reset the store to empty, returning the drained records so the
    /// caller can delete their backing files.
    async fn clear(&self) -> Result<Vec<TrackRecord>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("track not found: {0}")]
    NotFound(TrackId),
    #[error("history serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("history io failed: {0}")]
    Io(#[from] std::io::Error),
}
