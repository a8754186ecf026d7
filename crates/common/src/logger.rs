use crate::error::VoxbriefError;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// File name of the persistent log inside `log_dir`
pub const LOG_FILE_NAME: &str = "voxbrief.log";

/// Build the default filter directive for a configured level
///
/// Noisy dependency targets are capped so request-level tracing stays readable.
pub fn default_directive(log_level: &str) -> String {
    let level = parse_log_level(log_level).to_string().to_lowercase();
    format!("{level},hyper=warn,reqwest=warn,actix_server=info")
}

fn env_filter(log_level: &str) -> EnvFilter {
    // RUST_LOG env var takes precedence
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)))
}

/// Initialize logging to console and `<log_dir>/voxbrief.log`
///
/// Returns the log file path.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<PathBuf, VoxbriefError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        VoxbriefError::config(format!(
            "Failed to create log directory {}: {}",
            log_dir.display(),
            e
        ))
    })?;

    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            VoxbriefError::config(format!(
                "Failed to open log file {}: {}",
                log_file_path.display(),
                e
            ))
        })?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(env_filter(log_level));

    let file_layer = fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter(log_level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| VoxbriefError::config(format!("Failed to install log subscriber: {}", e)))?;

    tracing::info!(level = %log_level, file = %log_file_path.display(), "Logging initialized");

    Ok(log_file_path)
}

/// Console-only logging, for the `check` command and local runs
pub fn setup_console_logging(log_level: &str) -> Result<(), VoxbriefError> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter(log_level))
        .try_init()
        .map_err(|e| VoxbriefError::config(format!("Failed to install log subscriber: {}", e)))?;

    Ok(())
}

/// Parse string to tracing Level
pub fn parse_log_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to INFO", level);
            Level::INFO
        }
    }
}
