use chrono::{Duration, Utc};

use voxsplit::application::ports::{HistoryError, HistoryRepository};
use voxsplit::domain::{MediaPath, SeparationMethod, TrackId, TrackRecord, TrackStatus};
use voxsplit::infrastructure::history::JsonHistoryRepository;

fn create_repository(cap: usize) -> (tempfile::TempDir, JsonHistoryRepository) {
    let dir = tempfile::TempDir::new().unwrap();
    let repository =
        JsonHistoryRepository::new(dir.path().join("processing_history.json"), cap).unwrap();
    (dir, repository)
}

fn record_at_offset(name: &str, minutes_ago: i64) -> TrackRecord {
    let mut record = TrackRecord::new(TrackId::new(), name.to_string());
    record.upload_date = Utc::now() - Duration::minutes(minutes_ago);
    record
}

fn stem_paths(id: TrackId) -> (MediaPath, MediaPath) {
    (
        MediaPath::scoped(&id, "song_vocals.wav").unwrap(),
        MediaPath::scoped(&id, "song_accompaniment.wav").unwrap(),
    )
}

#[tokio::test]
async fn given_no_backing_file_when_listing_then_returns_empty() {
    let (_dir, repository) = create_repository(10);

    let records = repository.list().await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn given_appended_records_when_listing_then_most_recent_first() {
    let (_dir, repository) = create_repository(10);

    repository.append(record_at_offset("old.mp3", 30)).await.unwrap();
    repository.append(record_at_offset("new.mp3", 1)).await.unwrap();
    repository.append(record_at_offset("mid.mp3", 10)).await.unwrap();

    let records = repository.list().await.unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.original_name.as_str()).collect();
    assert_eq!(names, ["new.mp3", "mid.mp3", "old.mp3"]);
}

#[tokio::test]
async fn given_cap_exceeded_when_appending_then_oldest_records_are_evicted() {
    let (_dir, repository) = create_repository(3);

    for age in [50, 40, 30, 20, 10] {
        repository
            .append(record_at_offset(&format!("track-{}.mp3", age), age))
            .await
            .unwrap();
    }

    let records = repository.list().await.unwrap();

    assert_eq!(records.len(), 3);
    let names: Vec<&str> = records.iter().map(|r| r.original_name.as_str()).collect();
    assert_eq!(names, ["track-10.mp3", "track-20.mp3", "track-30.mp3"]);
}

#[tokio::test]
async fn given_known_id_when_marking_processed_then_record_gains_stems() {
    let (_dir, repository) = create_repository(10);
    let record = record_at_offset("song.mp3", 5);
    let id = record.id;
    repository.append(record).await.unwrap();

    let (vocals, accompaniment) = stem_paths(id);
    repository
        .mark_processed(id, SeparationMethod::Spleeter, vocals.clone(), accompaniment)
        .await
        .unwrap();

    let stored = repository.get(id).await.unwrap().unwrap();
    assert_eq!(stored.status, TrackStatus::Processed);
    assert_eq!(stored.method, Some(SeparationMethod::Spleeter));
    assert_eq!(stored.vocals_path, Some(vocals));
}

#[tokio::test]
async fn given_unknown_id_when_marking_processed_then_errors_and_store_unchanged() {
    let (_dir, repository) = create_repository(10);
    repository.append(record_at_offset("song.mp3", 5)).await.unwrap();

    let ghost = TrackId::new();
    let (vocals, accompaniment) = stem_paths(ghost);
    let result = repository
        .mark_processed(ghost, SeparationMethod::Demucs, vocals, accompaniment)
        .await;

    assert!(matches!(result, Err(HistoryError::NotFound(_))));
    let records = repository.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, TrackStatus::Uploaded);
}

#[tokio::test]
async fn given_populated_store_when_clearing_then_drained_records_are_returned() {
    let (_dir, repository) = create_repository(10);
    repository.append(record_at_offset("a.mp3", 2)).await.unwrap();
    repository.append(record_at_offset("b.mp3", 1)).await.unwrap();

    let drained = repository.clear().await.unwrap();

    assert_eq!(drained.len(), 2);
    assert!(repository.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_persisted_store_when_reopened_then_records_survive() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("processing_history.json");

    {
        let repository = JsonHistoryRepository::new(path.clone(), 10).unwrap();
        repository.append(record_at_offset("song.mp3", 1)).await.unwrap();
    }

    let reopened = JsonHistoryRepository::new(path, 10).unwrap();
    let records = reopened.list().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original_name, "song.mp3");
}

#[tokio::test]
async fn given_concurrent_appends_when_saving_then_no_update_is_lost() {
    let (_dir, repository) = create_repository(100);
    let repository = std::sync::Arc::new(repository);

    let mut handles = Vec::new();
    for i in 0..20 {
        let repository = std::sync::Arc::clone(&repository);
        handles.push(tokio::spawn(async move {
            repository
                .append(record_at_offset(&format!("track-{}.mp3", i), i))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let records = repository.list().await.unwrap();
    assert_eq!(records.len(), 20);
}
