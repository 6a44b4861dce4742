use std::sync::Arc;

use crate::application::ports::{HistoryRepository, MediaStore, TranscriptionEngine};
use crate::application::services::{BundleService, TrackService};
use crate::presentation::config::Settings;

pub struct AppState<H, T: ?Sized>
where
    H: HistoryRepository,
    T: TranscriptionEngine,
{
    pub tracks: Arc<TrackService<H>>,
    pub bundles: Arc<BundleService<H>>,
    pub history: Arc<H>,
    pub media: Arc<dyn MediaStore>,
    pub transcriber: Arc<T>,
    pub settings: Settings,
}

impl<H, T: ?Sized> Clone for AppState<H, T>
where
    H: HistoryRepository,
    T: TranscriptionEngine,
{
    fn clone(&self) -> Self {
        Self {
            tracks: Arc::clone(&self.tracks),
            bundles: Arc::clone(&self.bundles),
            history: Arc::clone(&self.history),
            media: Arc::clone(&self.media),
            transcriber: Arc::clone(&self.transcriber),
            settings: self.settings.clone(),
        }
    }
}
