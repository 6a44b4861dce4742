mod audio_format;
mod media_path;
mod separation_method;
mod track;
mod track_status;

pub use audio_format::{playback_mime, AudioFormat};
pub use media_path::{MediaPath, MediaPathError};
pub use separation_method::SeparationMethod;
pub use track::{TrackId, TrackRecord};
pub use track_status::TrackStatus;
