mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, MediaSettings, SeparationSettings, ServerSettings, Settings,
    TranscriptionProviderSetting, TranscriptionSettings,
};
