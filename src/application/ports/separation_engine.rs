use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Absolute locations of the two stems an engine produced inside the
/// job-scoped output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemPair {
    pub vocals: PathBuf,
    pub accompaniment: PathBuf,
}

/// One separation backend. Given a source file and a job-scoped output
/// directory, produce exactly two files (vocals, accompaniment) in that
/// directory. No retry, no partial results: any failure is terminal.
#[async_trait]
pub trait SeparationEngine: Send + Sync {
    async fn separate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<StemPair, SeparationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SeparationError {
    #[error("failed to launch separator: {0}")]
    SpawnFailed(String),
    #[error("separator failed: {0}")]
    EngineFailed(String),
    #[error("separator produced no {0} output")]
    OutputMissing(&'static str),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
