use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::MediaPath;

/// Byte storage for uploads and separation outputs, addressed by paths
/// relative to one media root.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, path: &MediaPath, data: Bytes) -> Result<(), MediaStoreError>;

    async fn fetch(&self, path: &MediaPath) -> Result<Bytes, MediaStoreError>;

    async fn delete(&self, path: &MediaPath) -> Result<(), MediaStoreError>;

    async fn exists(&self, path: &MediaPath) -> Result<bool, MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
