use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use voxbrief_common::{Result, VoxbriefError};
use voxbrief_llm::Summarizer;
use voxbrief_stt::{Transcriber, TranscriptionOptions};

use crate::storage::TransientStorage;
use crate::types::UploadedAudio;
use crate::validation::validate_upload;

/// Workflow execution stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Received,
    Validated,
    Stored,
    Transcribed,
    Summarized,
    CleanedUp,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Stored => "stored",
            Self::Transcribed => "transcribed",
            Self::Summarized => "summarized",
            Self::CleanedUp => "cleaned_up",
        };
        f.write_str(name)
    }
}

/// Workflow execution result
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOutput {
    pub transcript: String,
    pub summary: String,
}

/// Sequences validation, storage, transcription and summarization for one upload
pub struct VoicemailWorkflow {
    transcriber: Arc<dyn Transcriber>,
    summarizer: Arc<dyn Summarizer>,
    storage: TransientStorage,
    options: TranscriptionOptions,
}

impl VoicemailWorkflow {
    /// Create new workflow executor
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        summarizer: Arc<dyn Summarizer>,
        storage: TransientStorage,
        options: TranscriptionOptions,
    ) -> Self {
        Self {
            transcriber,
            summarizer,
            storage,
            options,
        }
    }

    /// Storage backing this workflow
    pub fn storage(&self) -> &TransientStorage {
        &self.storage
    }

    /// Process one upload end to end
    ///
    /// The stored file is gone by the time this returns, whatever the outcome.
    pub async fn process(&self, upload: Option<UploadedAudio>) -> Result<WorkflowOutput> {
        let mut stage = WorkflowStage::Received;
        let result = self.run(upload.as_ref(), &mut stage).await;

        if let Err(e) = &result {
            if e.is_client_error() {
                warn!(stage = %stage, error = %e, "Upload rejected");
            } else {
                error!(stage = %stage, error = %e, "Error processing upload");
            }
        }

        result
    }

    async fn run(
        &self,
        upload: Option<&UploadedAudio>,
        stage: &mut WorkflowStage,
    ) -> Result<WorkflowOutput> {
        let filename = validate_upload(upload)?;
        let data = upload.map(|u| u.data.as_slice()).unwrap_or_default();
        *stage = WorkflowStage::Validated;
        debug!(filename = %filename, bytes = data.len(), "Upload validated");

        let stored = self.storage.store(filename, data).await?;
        *stage = WorkflowStage::Stored;

        info!("Starting transcription...");
        let transcription = self
            .transcriber
            .transcribe(stored.path(), &self.options)
            .await?;
        *stage = WorkflowStage::Transcribed;

        if transcription.is_blank() {
            return Err(VoxbriefError::EmptyTranscript);
        }

        info!("Starting summarization...");
        let summary = self.summarizer.summarize(&transcription.text).await?;
        *stage = WorkflowStage::Summarized;

        stored.remove().await?;
        *stage = WorkflowStage::CleanedUp;

        info!(
            transcript_chars = transcription.char_count(),
            summary_chars = summary.len(),
            "Upload processed"
        );

        Ok(WorkflowOutput {
            transcript: transcription.text,
            summary,
        })
    }
}
