mod history_repository;
mod media_store;
mod separation_engine;
mod transcription_engine;

pub use history_repository::{HistoryError, HistoryRepository};
pub use media_store::{MediaStore, MediaStoreError};
pub use separation_engine::{SeparationEngine, SeparationError, StemPair};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
