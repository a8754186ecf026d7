use serde::{Deserialize, Serialize};

/// Audio part received on `POST /upload`
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    /// Client-declared filename (absent when the part carried none)
    pub filename: Option<String>,

    /// Raw file bytes
    pub data: Vec<u8>,
}

impl UploadedAudio {
    pub fn new(filename: Option<String>, data: Vec<u8>) -> Self {
        Self { filename, data }
    }
}

/// Successful processing result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always true
    pub success: bool,

    /// Full transcript
    pub transcript: String,

    /// Structured summary
    pub summary: String,
}

impl UploadResponse {
    pub fn new(transcript: String, summary: String) -> Self {
        Self {
            success: true,
            transcript,
            summary,
        }
    }
}

/// Error body for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
