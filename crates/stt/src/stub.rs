use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use voxbrief_common::{Result, VoxbriefError};

use crate::transcriber::Transcriber;
use crate::types::{Transcription, TranscriptionOptions};

#[derive(Debug, Clone)]
enum Outcome {
    Text(String),
    Failure(String),
}

/// Deterministic transcriber for tests and offline runs
#[derive(Debug)]
pub struct StubTranscriber {
    outcome: Outcome,
    calls: AtomicUsize,
    last_path: Mutex<Option<PathBuf>>,
    last_options: Mutex<Option<TranscriptionOptions>>,
}

impl StubTranscriber {
    /// Always return `text`
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Text(text.into()))
    }

    /// Always fail with `detail`
    pub fn failing(detail: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Failure(detail.into()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_path: Mutex::new(None),
            last_options: Mutex::new(None),
        }
    }

    /// Number of `transcribe` invocations so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Path passed to the most recent invocation
    pub fn last_path(&self) -> Option<PathBuf> {
        self.last_path.lock().ok().and_then(|p| p.clone())
    }

    /// Options passed to the most recent invocation
    pub fn last_options(&self) -> Option<TranscriptionOptions> {
        self.last_options.lock().ok().and_then(|o| o.clone())
    }
}

#[async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<Transcription> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_path.lock() {
            *last = Some(audio_path.to_path_buf());
        }
        if let Ok(mut last) = self.last_options.lock() {
            *last = Some(options.clone());
        }

        match &self.outcome {
            Outcome::Text(text) => Ok(Transcription::new(text.clone())),
            Outcome::Failure(detail) => Err(VoxbriefError::transcription(detail.clone())),
        }
    }
}
