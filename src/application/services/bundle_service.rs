use std::io::{Cursor, Write};
use std::sync::Arc;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::application::ports::{HistoryError, HistoryRepository, MediaStore, MediaStoreError};
use crate::domain::{MediaPath, TrackRecord};

/// Which stems to include in a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemSelection {
    Both,
    Vocals,
    Accompaniment,
}

impl StemSelection {
    fn wants_vocals(self) -> bool {
        matches!(self, StemSelection::Both | StemSelection::Vocals)
    }

    fn wants_accompaniment(self) -> bool {
        matches!(self, StemSelection::Both | StemSelection::Accompaniment)
    }
}

/// Assembles in-memory zip archives over the processed records of the
/// history: one vocals and/or accompaniment entry per record.
pub struct BundleService<H: HistoryRepository> {
    history: Arc<H>,
    media: Arc<dyn MediaStore>,
}

impl<H: HistoryRepository> BundleService<H> {
    pub fn new(history: Arc<H>, media: Arc<dyn MediaStore>) -> Self {
        Self { history, media }
    }

    pub async fn build(&self, selection: StemSelection) -> Result<Vec<u8>, BundleError> {
        let records = self.history.list().await?;
        if records.is_empty() {
            return Err(BundleError::Empty);
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for record in records.iter().filter(|r| r.is_processed()) {
            if selection.wants_vocals() {
                if let Some(path) = &record.vocals_path {
                    self.add_entry(&mut writer, options, record, path, "vocals")
                        .await?;
                }
            }
            if selection.wants_accompaniment() {
                if let Some(path) = &record.accompaniment_path {
                    self.add_entry(&mut writer, options, record, path, "accompaniment")
                        .await?;
                }
            }
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }

    async fn add_entry(
        &self,
        writer: &mut ZipWriter<Cursor<Vec<u8>>>,
        options: SimpleFileOptions,
        record: &TrackRecord,
        path: &MediaPath,
        stem: &str,
    ) -> Result<(), BundleError> {
        let data = match self.media.fetch(path).await {
            Ok(data) => data,
            // A stem recorded in history but gone from disk is skipped, not
            // a bundle failure.
            Err(MediaStoreError::NotFound(_)) => {
                tracing::warn!(path = %path, "Skipping missing stem file");
                return Ok(());
            }
            Err(e) => return Err(BundleError::Media(e)),
        };

        let entry_name = format!("{}_{}_{}.wav", record.id, record.original_name, stem);
        writer.start_file(entry_name, options)?;
        writer.write_all(&data)?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("no files to download")]
    Empty,
    #[error("history: {0}")]
    History(#[from] HistoryError),
    #[error("media: {0}")]
    Media(MediaStoreError),
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
