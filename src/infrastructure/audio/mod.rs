mod demucs_engine;
mod openai_whisper_engine;
mod spleeter_engine;
mod stem_discovery;
mod transcription_engine_factory;
mod whisper_cli_engine;

pub use demucs_engine::DemucsEngine;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use spleeter_engine::SpleeterEngine;
pub use transcription_engine_factory::TranscriptionEngineFactory;
pub use whisper_cli_engine::WhisperCliEngine;
