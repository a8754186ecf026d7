//! Voxbrief shared configuration, error taxonomy and logging

pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::VoxbriefError;
pub type Result<T> = std::result::Result<T, VoxbriefError>;
