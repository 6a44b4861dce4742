use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{SeparationEngine, SeparationError, StemPair};

use super::stem_discovery::{file_stem, promote_stem, stderr_tail};

/// Spectrogram-masking separation via the `spleeter` CLI (2stems model).
pub struct SpleeterEngine {
    bin: PathBuf,
}

impl SpleeterEngine {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl SeparationEngine for SpleeterEngine {
    async fn separate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<StemPair, SeparationError> {
        tokio::fs::create_dir_all(output_dir).await?;

        tracing::debug!(
            input = %input.display(),
            output_dir = %output_dir.display(),
            "Invoking spleeter"
        );

        // `-f {instrument}.{codec}` drops the per-track subdirectory, so
        // stems land directly in the job directory.
        let output = Command::new(&self.bin)
            .arg("separate")
            .arg("-p")
            .arg("spleeter:2stems")
            .arg("-o")
            .arg(output_dir)
            .arg("-f")
            .arg("{instrument}.{codec}")
            .arg(input)
            .output()
            .await
            .map_err(|e| {
                SeparationError::SpawnFailed(format!("{}: {}", self.bin.display(), e))
            })?;

        if !output.status.success() {
            tracing::error!(
                code = ?output.status.code(),
                "spleeter exited with an error"
            );
            return Err(SeparationError::EngineFailed(stderr_tail(&output.stderr)));
        }

        let track_stem = file_stem(input);
        let vocals = promote_stem(
            output_dir,
            &track_stem,
            &["vocals.wav".to_string()],
            &["vocal", "voice"],
            &["no_vocal", "accompaniment", "instrument"],
            "vocals",
        )
        .await?;
        let accompaniment = promote_stem(
            output_dir,
            &track_stem,
            &["accompaniment.wav".to_string()],
            &["accompaniment", "instrument", "no_vocal"],
            &[],
            "accompaniment",
        )
        .await?;

        Ok(StemPair {
            vocals,
            accompaniment,
        })
    }
}
