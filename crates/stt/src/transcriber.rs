use async_trait::async_trait;
use std::path::Path;
use voxbrief_common::Result;

use crate::types::{Transcription, TranscriptionOptions};

/// Common trait for speech-to-text backends
///
/// Failures are reported as `VoxbriefError::Transcription`. An empty transcript is
/// a successful result; deciding what to do with it is up to the caller.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio_path`
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<Transcription>;
}
