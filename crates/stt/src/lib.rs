//! Voxbrief STT (Speech-to-Text)
//!
//! Remote Whisper transcription behind the [`Transcriber`] trait

pub mod audio;
pub mod stub;
pub mod transcriber;
pub mod types;
pub mod whisper;

// Re-export main types
pub use audio::{audio_extension, is_supported_audio, mime_type, SUPPORTED_EXTENSIONS};
pub use stub::StubTranscriber;
pub use transcriber::Transcriber;
pub use types::{Transcription, TranscriptionOptions};
pub use whisper::WhisperApiClient;
