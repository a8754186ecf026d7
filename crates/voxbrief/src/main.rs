use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use voxbrief_common::{logger, AppConfig};
use voxbrief_llm::StubSummarizer;
use voxbrief_server::AppState;
use voxbrief_stt::StubTranscriber;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "voxbrief")]
#[command(about = "Voxbrief - voicemail transcription and summarization service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Directory for transient uploads
        #[arg(long)]
        upload_dir: Option<PathBuf>,

        /// Answer with canned transcripts and summaries instead of calling the API
        #[arg(long)]
        stub: bool,
    },

    /// Verify configuration and API connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before AppConfig::from_env so the project root file wins
    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port, upload_dir, stub }) => {
            let mut config = AppConfig::from_env()?;
            if let Some(host) = host {
                config.server_host = host;
            }
            if let Some(port) = port {
                config.server_port = port;
            }
            if let Some(dir) = upload_dir {
                config.upload_dir = dir;
            }
            serve(config, stub).await?;
        }
        Some(Commands::Check) => {
            let config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;
            check(&config).await?;
        }
        None => {
            // Default: start server with environment configuration
            let config = AppConfig::from_env()?;
            serve(config, false).await?;
        }
    }

    Ok(())
}

async fn serve(config: AppConfig, stub: bool) -> Result<()> {
    config.validate()?;
    config.ensure_directories()?;

    let log_file = logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Voxbrief starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Upload dir: {}", config.upload_dir.display());
    tracing::info!("  Max upload: {} MB", config.max_upload_mb);
    tracing::info!("  Transcription model: {}", config.transcription_model);
    tracing::info!("  Summary model: {}", config.summary_model);
    tracing::info!("  Log file: {}", log_file.display());

    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; using the default value");
    }

    let state = if stub {
        tracing::warn!("Stub mode: remote transcription and summarization are disabled");
        AppState::new(
            config,
            Arc::new(StubTranscriber::returning(
                "Hi, this is a test voicemail. Please call me back.",
            )),
            Arc::new(StubSummarizer::returning("Caller asks for a call back.")),
        )?
    } else {
        if !config.has_api_key() {
            tracing::warn!("OPENAI_API_KEY is not set; uploads will fail until it is configured");
        }
        AppState::from_config(config)?
    };

    println!("Server listening on http://{}", state.config.server_bind_address());

    voxbrief_server::start_server(state).await?;

    Ok(())
}

async fn check(config: &AppConfig) -> Result<()> {
    let report = voxbrief_server::run_checks(config).await;

    for result in &report.results {
        println!("{:<6} {}", format!("[{}]", result.status), result.detail);
    }

    if !report.all_passed() {
        bail!("{} check(s) failed", report.failures());
    }

    println!("All checks passed");
    Ok(())
}
