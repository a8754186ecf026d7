use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use voxbrief_common::{Result, VoxbriefError};

use crate::llm_trait::Summarizer;

/// Deterministic summarizer for tests and offline runs
#[derive(Debug)]
pub struct StubSummarizer {
    outcome: std::result::Result<String, String>,
    calls: AtomicUsize,
    last_transcript: Mutex<Option<String>>,
}

impl StubSummarizer {
    /// Always return `summary`
    pub fn returning(summary: impl Into<String>) -> Self {
        Self::with_outcome(Ok(summary.into()))
    }

    /// Always fail with `detail`
    pub fn failing(detail: impl Into<String>) -> Self {
        Self::with_outcome(Err(detail.into()))
    }

    fn with_outcome(outcome: std::result::Result<String, String>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_transcript: Mutex::new(None),
        }
    }

    /// Number of `summarize` invocations so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Transcript received by the most recent invocation
    pub fn last_transcript(&self) -> Option<String> {
        self.last_transcript.lock().ok().and_then(|t| t.clone())
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_transcript.lock() {
            *last = Some(transcript.to_string());
        }

        self.outcome
            .clone()
            .map_err(VoxbriefError::summarization)
    }
}
