//! HTTP route handlers

pub mod index;
pub mod system;
pub mod upload;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use voxbrief_common::VoxbriefError;

use crate::types::ErrorResponse;

/// Convert an error into its JSON response (`{"error": "..."}`)
pub fn error_response(err: &VoxbriefError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse {
        error: err.to_string(),
    })
}
