//! Voxbrief HTTP Server
//!
//! Actix-web REST API: upload page, `POST /upload` and `GET /health`

pub mod preflight;
pub mod routes;
pub mod state;
pub mod storage;
pub mod types;
pub mod validation;
pub mod workflow;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use voxbrief_common::Result;

pub use preflight::{run_checks, CheckReport, CheckResult, CheckStatus};
pub use state::AppState;
pub use types::{ErrorResponse, HealthResponse, UploadResponse, UploadedAudio};
pub use workflow::{VoicemailWorkflow, WorkflowOutput, WorkflowStage};

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::index::index)
        .service(routes::upload::upload)
        .service(routes::system::health);
}

/// Bind and run the server until shutdown
pub async fn start_server(state: AppState) -> Result<()> {
    let bind_addr = state.config.server_bind_address();
    let data = web::Data::new(state);

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
