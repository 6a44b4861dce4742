/// Upload formats the service accepts, plus the MIME mapping used for
/// inline playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        match extension_of(filename)?.as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            _ => None,
        }
    }
}

/// MIME type for playback, keyed on extension. Unknown extensions fall back
/// to `audio/mpeg` so browsers still attempt playback.
pub fn playback_mime(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => "audio/mpeg",
    }
}

fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_allowed_extensions_when_checked_then_recognized() {
        assert_eq!(AudioFormat::from_filename("a.mp3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_filename("a.WAV"), Some(AudioFormat::Wav));
    }

    #[test]
    fn given_disallowed_or_missing_extension_when_checked_then_none() {
        assert_eq!(AudioFormat::from_filename("a.flac"), None);
        assert_eq!(AudioFormat::from_filename("noext"), None);
    }

    #[test]
    fn given_filenames_when_mapping_mime_then_matches_extension() {
        assert_eq!(playback_mime("x.wav"), "audio/wav");
        assert_eq!(playback_mime("x.ogg"), "audio/ogg");
        assert_eq!(playback_mime("x.bin"), "audio/mpeg");
    }
}
