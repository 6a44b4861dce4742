//! Locating separator CLI output. Different separator versions name their
//! stems differently, so discovery tries exact candidate names first and
//! falls back to a keyword scan of the directory.

use std::path::{Path, PathBuf};

use crate::application::ports::SeparationError;

/// Find a produced stem in `dir` and move it to
/// `{dir}/{track_stem}_{label}.wav`, returning the final path.
/// `exclude` keeps the keyword scan for one stem from grabbing the other
/// (e.g. `no_vocals.wav` while hunting vocals).
pub async fn promote_stem(
    dir: &Path,
    track_stem: &str,
    candidates: &[String],
    keywords: &[&str],
    exclude: &[&str],
    label: &'static str,
) -> Result<PathBuf, SeparationError> {
    let source = locate_output(dir, candidates, keywords, exclude)
        .await?
        .ok_or(SeparationError::OutputMissing(label))?;

    let target = dir.join(format!("{}_{}.wav", track_stem, label));
    if source != target {
        tokio::fs::rename(&source, &target).await?;
    }
    Ok(target)
}

async fn locate_output(
    dir: &Path,
    candidates: &[String],
    keywords: &[&str],
    exclude: &[&str],
) -> Result<Option<PathBuf>, SeparationError> {
    for candidate in candidates {
        let path = dir.join(candidate);
        if tokio::fs::try_exists(&path).await? {
            return Ok(Some(path));
        }
    }

    // Fuzzy fallback: first file whose name mentions the stem.
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if exclude.iter().any(|k| name.contains(k)) {
            continue;
        }
        if keywords.iter().any(|k| name.contains(k)) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

/// Input filename without its extension, used to derive output names.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Bounded slice of a child's stderr for error messages.
pub fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "no error output".to_string();
    }
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= 500 {
        trimmed.to_string()
    } else {
        chars[chars.len() - 500..].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn given_candidate_name_when_promoting_then_file_is_renamed() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("vocals.wav"), b"x")
            .await
            .unwrap();

        let path = promote_stem(
            dir.path(),
            "song",
            &["vocals.wav".to_string()],
            &["vocal"],
            &["no_vocal"],
            "vocals",
        )
        .await
        .unwrap();

        assert_eq!(path, dir.path().join("song_vocals.wav"));
        assert!(path.exists());
        assert!(!dir.path().join("vocals.wav").exists());
    }

    #[tokio::test]
    async fn given_drifted_name_when_promoting_then_keyword_scan_finds_it() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("song_(Vocals)_model.wav"), b"x")
            .await
            .unwrap();

        let path = promote_stem(
            dir.path(),
            "song",
            &["vocals.wav".to_string()],
            &["vocal"],
            &["no_vocal"],
            "vocals",
        )
        .await
        .unwrap();

        assert_eq!(path, dir.path().join("song_vocals.wav"));
    }

    #[tokio::test]
    async fn given_no_output_when_promoting_then_errors() {
        let dir = tempfile::tempdir().unwrap();

        let result = promote_stem(
            dir.path(),
            "song",
            &["vocals.wav".to_string()],
            &["vocal"],
            &["no_vocal"],
            "vocals",
        )
        .await;

        assert!(matches!(result, Err(SeparationError::OutputMissing(_))));
    }

    #[test]
    fn given_long_stderr_when_tailing_then_bounded() {
        let noisy = "x".repeat(2000);
        assert_eq!(stderr_tail(noisy.as_bytes()).len(), 500);
        assert_eq!(stderr_tail(b""), "no error output");
    }
}
