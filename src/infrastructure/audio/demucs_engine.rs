use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{SeparationEngine, SeparationError, StemPair};

use super::stem_discovery::{file_stem, promote_stem, stderr_tail};

/// Waveform-domain separation via the `demucs` CLI in two-stem mode.
pub struct DemucsEngine {
    bin: PathBuf,
    model: String,
}

impl DemucsEngine {
    pub fn new(bin: impl Into<PathBuf>, model: String) -> Self {
        Self {
            bin: bin.into(),
            model,
        }
    }

    /// demucs nests its output as `{out}/{model}/{track}/`. Resolve that
    /// directory, tolerating a track name the CLI normalized.
    async fn track_dir(&self, output_dir: &Path, track_stem: &str) -> Option<PathBuf> {
        let model_dir = output_dir.join(&self.model);
        let expected = model_dir.join(track_stem);
        if expected.is_dir() {
            return Some(expected);
        }

        let mut entries = tokio::fs::read_dir(&model_dir).await.ok()?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry.path().is_dir() {
                return Some(entry.path());
            }
        }
        None
    }
}

#[async_trait]
impl SeparationEngine for DemucsEngine {
    async fn separate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<StemPair, SeparationError> {
        tokio::fs::create_dir_all(output_dir).await?;

        tracing::debug!(
            input = %input.display(),
            output_dir = %output_dir.display(),
            model = %self.model,
            "Invoking demucs"
        );

        let output = Command::new(&self.bin)
            .arg("--two-stems")
            .arg("vocals")
            .arg("-n")
            .arg(&self.model)
            .arg("-o")
            .arg(output_dir)
            .arg(input)
            .output()
            .await
            .map_err(|e| {
                SeparationError::SpawnFailed(format!("{}: {}", self.bin.display(), e))
            })?;

        if !output.status.success() {
            tracing::error!(code = ?output.status.code(), "demucs exited with an error");
            return Err(SeparationError::EngineFailed(stderr_tail(&output.stderr)));
        }

        let track_stem = file_stem(input);
        let nested = self
            .track_dir(output_dir, &track_stem)
            .await
            .ok_or(SeparationError::OutputMissing("vocals"))?;

        // Two-stem mode emits vocals.wav and no_vocals.wav; pull both up
        // into the job directory under the canonical names.
        let vocals_src = nested.join("vocals.wav");
        let vocals = output_dir.join(format!("{}_vocals.wav", track_stem));
        if tokio::fs::try_exists(&vocals_src).await? {
            tokio::fs::rename(&vocals_src, &vocals).await?;
        } else {
            promote_and_lift(
                &nested,
                output_dir,
                &track_stem,
                &["vocal"],
                &["no_vocal"],
                "vocals",
            )
            .await?;
        }

        let accompaniment_src = nested.join("no_vocals.wav");
        let accompaniment = output_dir.join(format!("{}_accompaniment.wav", track_stem));
        if tokio::fs::try_exists(&accompaniment_src).await? {
            tokio::fs::rename(&accompaniment_src, &accompaniment).await?;
        } else {
            promote_and_lift(
                &nested,
                output_dir,
                &track_stem,
                &["no_vocal", "instrument", "accompaniment"],
                &[],
                "accompaniment",
            )
            .await?;
        }

        // The emptied model directory is scaffolding, not a result.
        let _ = tokio::fs::remove_dir_all(output_dir.join(&self.model)).await;

        Ok(StemPair {
            vocals,
            accompaniment,
        })
    }
}

/// Keyword-locate a stem inside the nested track directory and move it up
/// into the job directory.
async fn promote_and_lift(
    nested: &Path,
    output_dir: &Path,
    track_stem: &str,
    keywords: &[&str],
    exclude: &[&str],
    label: &'static str,
) -> Result<PathBuf, SeparationError> {
    let promoted = promote_stem(nested, track_stem, &[], keywords, exclude, label).await?;
    let target = output_dir.join(format!("{}_{}.wav", track_stem, label));
    tokio::fs::rename(&promoted, &target).await?;
    Ok(target)
}
