use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub media: MediaSettings,
    pub separation: SeparationSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    /// Root directory for uploads and stem outputs.
    pub root_dir: String,
    pub max_upload_mb: usize,
    /// Backing file of the history store.
    pub history_file: String,
    /// Record cap of the history store.
    pub max_history: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeparationSettings {
    pub spleeter_bin: String,
    pub demucs_bin: String,
    pub demucs_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub model: String,
    pub whisper_bin: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    Cli,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}
