use crate::error::VoxbriefError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder shipped in the sample `.env`; treated as "not configured"
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

const DEFAULT_SECRET_KEY: &str = "your-secret-key-here";

/// Voxbrief application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenAI-compatible API credential
    #[serde(skip_serializing, default)]
    pub openai_api_key: String,

    /// OpenAI-compatible API base URL
    pub openai_base_url: String,

    /// Speech-to-text model name
    pub transcription_model: String,

    /// Language hint for transcription (ISO-639-1)
    pub transcription_language: Option<String>,

    /// Vocabulary prompt for transcription (names, company terms)
    pub transcription_prompt: Option<String>,

    /// Sampling temperature for transcription; unset leaves the service default
    pub transcription_temperature: Option<f32>,

    /// Chat model used for summaries
    pub summary_model: String,

    /// Upper bound on generated summary tokens
    pub summary_max_tokens: u32,

    /// Sampling temperature for summaries
    pub summary_temperature: f32,

    /// Overall timeout for each remote call
    pub request_timeout_secs: u64,

    /// Transient upload directory path
    pub upload_dir: PathBuf,

    /// Maximum accepted upload size in megabytes
    pub max_upload_mb: u64,

    /// Session signing secret (not used by request processing)
    #[serde(skip_serializing, default)]
    pub secret_key: String,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            transcription_model: "whisper-1".to_string(),
            transcription_language: None,
            transcription_prompt: None,
            transcription_temperature: None,
            summary_model: "gpt-3.5-turbo".to_string(),
            summary_max_tokens: 500,
            summary_temperature: 0.3,
            request_timeout_secs: 300,
            upload_dir: PathBuf::from("./uploads"),
            max_upload_mb: 50,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    ///
    /// Directories are not touched; call [`AppConfig::ensure_directories`] before serving.
    pub fn from_env() -> Result<Self, VoxbriefError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_base_url),
            transcription_model: std::env::var("TRANSCRIPTION_MODEL")
                .unwrap_or(defaults.transcription_model),
            transcription_language: std::env::var("TRANSCRIPTION_LANGUAGE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            transcription_prompt: std::env::var("TRANSCRIPTION_PROMPT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            transcription_temperature: Self::get_env_parsed("TRANSCRIPTION_TEMPERATURE"),
            summary_model: std::env::var("SUMMARY_MODEL").unwrap_or(defaults.summary_model),
            summary_max_tokens: Self::get_env_parsed("SUMMARY_MAX_TOKENS")
                .unwrap_or(defaults.summary_max_tokens),
            summary_temperature: Self::get_env_parsed("SUMMARY_TEMPERATURE")
                .unwrap_or(defaults.summary_temperature),
            request_timeout_secs: Self::get_env_parsed("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            upload_dir: Self::get_env_path("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            max_upload_mb: Self::get_env_parsed("MAX_UPLOAD_MB").unwrap_or(defaults.max_upload_mb),
            secret_key: std::env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("PORT").unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Parse environment variable, ignoring unparsable values
    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), VoxbriefError> {
        for dir in [&self.upload_dir, &self.log_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    VoxbriefError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Whether a usable API key is present
    pub fn has_api_key(&self) -> bool {
        let key = self.openai_api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// Whether the session secret is still the shipped default
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Maximum upload size in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), VoxbriefError> {
        if self.transcription_model.trim().is_empty() {
            return Err(VoxbriefError::config("Transcription model name cannot be empty"));
        }

        if self.summary_model.trim().is_empty() {
            return Err(VoxbriefError::config("Summary model name cannot be empty"));
        }

        if !self.openai_base_url.starts_with("http://")
            && !self.openai_base_url.starts_with("https://") {
            return Err(VoxbriefError::config(
                "OpenAI base URL must start with http:// or https://"
            ));
        }

        if !(0.0..=2.0).contains(&self.summary_temperature) {
            return Err(VoxbriefError::config("Summary temperature must be between 0.0 and 2.0"));
        }

        if let Some(temperature) = self.transcription_temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(VoxbriefError::config(
                    "Transcription temperature must be between 0.0 and 1.0",
                ));
            }
        }

        if self.summary_max_tokens == 0 {
            return Err(VoxbriefError::config("Summary max tokens must be positive"));
        }

        if self.max_upload_mb == 0 {
            return Err(VoxbriefError::config("Maximum upload size must be positive"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(VoxbriefError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
