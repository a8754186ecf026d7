use actix_web::{get, HttpResponse};

use crate::types::HealthResponse;

/// Health check; independent of upload processing
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        message: "Voicemail Summarizer is running".to_string(),
    })
}
