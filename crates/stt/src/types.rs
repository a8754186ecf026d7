use serde::{Deserialize, Serialize};
use voxbrief_common::AppConfig;

/// Transcription result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Full transcribed text
    pub text: String,
}

impl Transcription {
    /// Create a new transcription
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// True when there is nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of characters in the transcript
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Transcription options
#[derive(Debug, Clone, Default)]
pub struct TranscriptionOptions {
    /// Language hint (e.g., "en", "ko")
    pub language: Option<String>,

    /// Prompt for domain-specific terms
    pub prompt: Option<String>,

    /// Sampling temperature; `None` leaves the service default
    pub temperature: Option<f32>,
}

impl TranscriptionOptions {
    /// Options configured for every request
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            language: config.transcription_language.clone(),
            prompt: config.transcription_prompt.clone(),
            temperature: config.transcription_temperature,
        }
    }
}
