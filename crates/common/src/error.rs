/// Voxbrief error types
///
/// The `Display` text of every variant is the message returned to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum VoxbriefError {
    /// Request carried no `audio_file` part
    #[error("No file uploaded")]
    NoFileUploaded,

    /// File part present but filename empty
    #[error("No file selected")]
    NoFileSelected,

    /// Extension missing or not an accepted audio format
    #[error("Invalid file type. Please upload an audio file.")]
    InvalidFileType,

    /// Speech recognition produced no usable text
    #[error("Could not transcribe audio. Please ensure the audio file contains clear speech.")]
    EmptyTranscript,

    /// Upload exceeded the configured limit (megabytes)
    #[error("File too large. Maximum upload size is {0} MB.")]
    PayloadTooLarge(u64),

    /// Speech-to-text service failure
    #[error("Failed to transcribe audio: {0}")]
    Transcription(String),

    /// Text generation service failure
    #[error("Failed to summarize text: {0}")]
    Summarization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Internal error
    #[error("{0}")]
    Internal(String),

    /// IO error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VoxbriefError {
    /// Create transcription error
    pub fn transcription<S: Into<String>>(msg: S) -> Self {
        Self::Transcription(msg.into())
    }

    /// Create summarization error
    pub fn summarization<S: Into<String>>(msg: S) -> Self {
        Self::Summarization(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the failure was caused by the client's input
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

// HTTP response conversion (used by the actix-web layer)
impl VoxbriefError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoFileUploaded => 400,
            Self::NoFileSelected => 400,
            Self::InvalidFileType => 400,
            Self::EmptyTranscript => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::Transcription(_) => 500,
            Self::Summarization(_) => 500,
            Self::Config(_) => 500,
            Self::Network(_) => 503,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
