use async_trait::async_trait;

/// Speech-to-text over one uploaded audio clip. Stateless; the history
/// store is never involved.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// `filename` is only an extension hint for the backend; `language` is
    /// an ISO code, or `None` for autodetection.
    async fn transcribe(
        &self,
        audio: &[u8],
        filename: &str,
        language: Option<&str>,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
