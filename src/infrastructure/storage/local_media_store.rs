use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::domain::MediaPath;

/// Media root on the local filesystem. Uploads sit at
/// `{track_id}_{original_name}`; stem outputs under `{track_id}/`.
pub struct LocalMediaStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf) -> Result<Self, MediaStoreError> {
        std::fs::create_dir_all(&root)?;
        let fs = LocalFileSystem::new_with_prefix(root)
            .map_err(|e| MediaStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, path: &MediaPath, data: Bytes) -> Result<(), MediaStoreError> {
        let location = StorePath::from(path.as_str());
        self.inner
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| MediaStoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    async fn fetch(&self, path: &MediaPath) -> Result<Bytes, MediaStoreError> {
        let location = StorePath::from(path.as_str());
        let result = self.inner.get(&location).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => MediaStoreError::NotFound(path.to_string()),
            other => MediaStoreError::ReadFailed(other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map_err(|e| MediaStoreError::ReadFailed(e.to_string()))
    }

    async fn delete(&self, path: &MediaPath) -> Result<(), MediaStoreError> {
        let location = StorePath::from(path.as_str());
        self.inner.delete(&location).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => MediaStoreError::NotFound(path.to_string()),
            other => MediaStoreError::DeleteFailed(other.to_string()),
        })
    }

    async fn exists(&self, path: &MediaPath) -> Result<bool, MediaStoreError> {
        let location = StorePath::from(path.as_str());
        match self.inner.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(MediaStoreError::ReadFailed(e.to_string())),
        }
    }
}
