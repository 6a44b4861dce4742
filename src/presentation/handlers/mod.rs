mod bundles;
mod files;
mod health;
mod history;
mod pages;
mod process;
mod transcribe;
mod upload;

pub use bundles::{
    download_accompaniment_handler, download_all_handler, download_vocals_handler,
};
pub use files::{download_handler, play_handler};
pub use health::health_handler;
pub use history::{clear_history_handler, history_handler};
pub use pages::{index_page, transcribe_page};
pub use process::process_handler;
pub use transcribe::transcribe_handler;
pub use upload::upload_handler;

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
