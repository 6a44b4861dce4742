use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MediaPath, SeparationMethod, TrackStatus};

/// Opaque identifier correlating an uploaded file with its processed stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(Uuid);

impl TrackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the upload history. Doubles as the on-disk JSON schema of
/// the history file, so field names are part of the persisted format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: TrackId,
    pub original_name: String,
    pub upload_date: DateTime<Utc>,
    pub status: TrackStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<SeparationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocals_path: Option<MediaPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accompaniment_path: Option<MediaPath>,
}

impl TrackRecord {
    pub fn new(id: TrackId, original_name: String) -> Self {
        Self {
            id,
            original_name,
            upload_date: Utc::now(),
            status: TrackStatus::Uploaded,
            method: None,
            vocals_path: None,
            accompaniment_path: None,
        }
    }

    /// Relative location of the raw upload under the media root.
    pub fn upload_path(&self) -> String {
        format!("{}_{}", self.id, self.original_name)
    }

    pub fn is_processed(&self) -> bool {
        self.status == TrackStatus::Processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_record_when_serialized_then_optional_fields_are_omitted() {
        let record = TrackRecord::new(TrackId::new(), "song.mp3".to_string());

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["status"], "uploaded");
        assert!(json.get("method").is_none());
        assert!(json.get("vocals_path").is_none());
        assert!(json.get("accompaniment_path").is_none());
    }

    #[test]
    fn given_processed_json_when_deserialized_then_paths_are_present() {
        let raw = r#"{
            "id": "6f6c9ab0-0000-4000-8000-000000000001",
            "original_name": "song.mp3",
            "upload_date": "2025-01-01T10:00:00Z",
            "status": "processed",
            "method": "demucs",
            "vocals_path": "abc/song_vocals.wav",
            "accompaniment_path": "abc/song_accompaniment.wav"
        }"#;

        let record: TrackRecord = serde_json::from_str(raw).unwrap();

        assert!(record.is_processed());
        assert_eq!(record.method, Some(SeparationMethod::Demucs));
        assert_eq!(
            record.vocals_path.as_ref().map(|p| p.as_str()),
            Some("abc/song_vocals.wav")
        );
    }
}
