use std::fmt;

use serde::{Deserialize, Serialize};

/// Relative path of a stored file under the media root, e.g.
/// `"{track_id}/{name}_vocals.wav"`. Parsing rejects anything that could
/// escape the root, so a validated `MediaPath` is always safe to join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaPath(String);

impl MediaPath {
    pub fn parse(raw: impl Into<String>) -> Result<Self, MediaPathError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(MediaPathError::Empty);
        }
        if raw.starts_with('/') || raw.starts_with('\\') || raw.contains(':') {
            return Err(MediaPathError::Absolute(raw));
        }
        if raw
            .split(['/', '\\'])
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(MediaPathError::Traversal(raw));
        }
        Ok(Self(raw))
    }

    /// Path of a job-scoped output file: `"{track_id}/{filename}"`.
    pub fn scoped(track_id: &crate::domain::TrackId, filename: &str) -> Result<Self, MediaPathError> {
        Self::parse(format!("{}/{}", track_id, filename))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MediaPath {
    type Error = MediaPathError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<MediaPath> for String {
    fn from(path: MediaPath) -> Self {
        path.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MediaPathError {
    #[error("empty media path")]
    Empty,
    #[error("absolute media path not allowed: {0}")]
    Absolute(String),
    #[error("media path escapes the media root: {0}")]
    Traversal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_relative_path_when_parsed_then_accepted() {
        let path = MediaPath::parse("abc/song_vocals.wav").unwrap();
        assert_eq!(path.as_str(), "abc/song_vocals.wav");
    }

    #[test]
    fn given_traversal_attempts_when_parsed_then_rejected() {
        for raw in ["../etc/passwd", "a/../b", "/etc/passwd", "a//b", "c:\\tmp"] {
            assert!(MediaPath::parse(raw).is_err(), "accepted {:?}", raw);
        }
    }
}
