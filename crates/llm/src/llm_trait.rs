use async_trait::async_trait;
use voxbrief_common::Result;

/// Common trait for summarization backends
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Condense a transcript into a structured summary
    ///
    /// Failures are reported as `VoxbriefError::Summarization`.
    async fn summarize(&self, transcript: &str) -> Result<String>;
}
