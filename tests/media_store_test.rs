use bytes::Bytes;

use voxsplit::application::ports::{MediaStore, MediaStoreError};
use voxsplit::domain::MediaPath;
use voxsplit::infrastructure::storage::LocalMediaStore;

fn create_test_store() -> (tempfile::TempDir, LocalMediaStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalMediaStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_stored_bytes_when_fetching_then_contents_match() {
    let (_dir, store) = create_test_store();
    let path = MediaPath::parse("abc_song.mp3").unwrap();

    store
        .store(&path, Bytes::from_static(b"audio bytes"))
        .await
        .unwrap();

    let fetched = store.fetch(&path).await.unwrap();
    assert_eq!(&fetched[..], b"audio bytes");
}

#[tokio::test]
async fn given_nested_path_when_storing_then_directories_are_created() {
    let (dir, store) = create_test_store();
    let path = MediaPath::parse("abc/song_vocals.wav").unwrap();

    store
        .store(&path, Bytes::from_static(b"stem"))
        .await
        .unwrap();

    assert!(dir.path().join("abc").join("song_vocals.wav").exists());
}

#[tokio::test]
async fn given_missing_path_when_fetching_then_returns_not_found() {
    let (_dir, store) = create_test_store();
    let path = MediaPath::parse("nope.wav").unwrap();

    let result = store.fetch(&path).await;

    assert!(matches!(result, Err(MediaStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_exists_becomes_false() {
    let (_dir, store) = create_test_store();
    let path = MediaPath::parse("abc_song.mp3").unwrap();

    store
        .store(&path, Bytes::from_static(b"audio"))
        .await
        .unwrap();
    assert!(store.exists(&path).await.unwrap());

    store.delete(&path).await.unwrap();
    assert!(!store.exists(&path).await.unwrap());
}

#[tokio::test]
async fn given_missing_path_when_deleting_then_returns_not_found() {
    let (_dir, store) = create_test_store();
    let path = MediaPath::parse("nope.wav").unwrap();

    let result = store.delete(&path).await;

    assert!(matches!(result, Err(MediaStoreError::NotFound(_))));
}
