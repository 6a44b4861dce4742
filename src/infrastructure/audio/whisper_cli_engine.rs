use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::stem_discovery::stderr_tail;

/// Transcription via the `whisper` CLI: the clip is staged in a scratch
/// directory, the CLI writes a plain-text transcript next to it.
pub struct WhisperCliEngine {
    bin: PathBuf,
    model: String,
}

impl WhisperCliEngine {
    pub fn new(bin: impl Into<PathBuf>, model: String) -> Self {
        Self {
            bin: bin.into(),
            model,
        }
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperCliEngine {
    async fn transcribe(
        &self,
        audio: &[u8],
        filename: &str,
        language: Option<&str>,
    ) -> Result<String, TranscriptionError> {
        let scratch = tempfile::tempdir()?;

        let extension = Path::new(filename)
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "wav".to_string());
        let clip = scratch.path().join(format!("clip.{}", extension));
        tokio::fs::write(&clip, audio).await?;

        let mut command = Command::new(&self.bin);
        command
            .arg(&clip)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_format")
            .arg("txt")
            .arg("--output_dir")
            .arg(scratch.path());
        if let Some(language) = language {
            command.arg("--language").arg(language);
        }

        tracing::debug!(model = %self.model, language = ?language, "Invoking whisper");

        let output = command.output().await.map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("{}: {}", self.bin.display(), e))
        })?;

        if !output.status.success() {
            return Err(TranscriptionError::TranscriptionFailed(stderr_tail(
                &output.stderr,
            )));
        }

        let transcript = scratch.path().join("clip.txt");
        let text = tokio::fs::read_to_string(&transcript).await.map_err(|_| {
            TranscriptionError::TranscriptionFailed(
                "transcriber produced no text output".to_string(),
            )
        })?;

        tracing::info!(chars = text.len(), "Whisper transcription completed");

        Ok(text.trim().to_string())
    }
}
