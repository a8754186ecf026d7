use actix_multipart::{Multipart, MultipartError};
use actix_web::{post, web, HttpResponse};
use futures_util::StreamExt;
use tracing::{debug, warn};
use voxbrief_common::{AppConfig, Result, VoxbriefError};

use crate::routes::error_response;
use crate::state::AppState;
use crate::types::{UploadResponse, UploadedAudio};

/// Multipart field carrying the recording
pub const AUDIO_FIELD: &str = "audio_file";

/// Errors raised when the request carries no multipart form at all
fn is_missing_form(err: &MultipartError, parts_seen: usize) -> bool {
    match err {
        MultipartError::NoContentType | MultipartError::ParseContentType => true,
        MultipartError::Boundary | MultipartError::Incomplete => parts_seen == 0,
        _ => false,
    }
}

fn malformed(err: impl std::fmt::Display) -> VoxbriefError {
    VoxbriefError::internal(format!("Malformed upload: {}", err))
}

/// Collect the first `audio_file` part, enforcing the upload size limit
///
/// A request without a multipart body yields `Ok(None)`.
async fn read_audio_field(
    payload: &mut Multipart,
    config: &AppConfig,
) -> Result<Option<UploadedAudio>> {
    let limit = config.max_upload_bytes();
    let mut audio = None;
    let mut parts_seen = 0;

    while let Some(field) = payload.next().await {
        let mut field = match field {
            Ok(field) => field,
            Err(e) if is_missing_form(&e, parts_seen) => {
                debug!(error = %e, "Request has no multipart form");
                break;
            }
            Err(e) => return Err(malformed(e)),
        };
        parts_seen += 1;

        let content_disposition = field.content_disposition();
        let is_audio = content_disposition.get_name() == Some(AUDIO_FIELD);
        let filename = content_disposition.get_filename().map(str::to_string);

        if !is_audio || audio.is_some() {
            // Drain unrelated parts
            while let Some(chunk) = field.next().await {
                chunk.map_err(malformed)?;
            }
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(malformed)?;
            if (data.len() + chunk.len()) as u64 > limit {
                return Err(VoxbriefError::PayloadTooLarge(config.max_upload_mb));
            }
            data.extend_from_slice(&chunk);
        }

        debug!(filename = ?filename, bytes = data.len(), "Received audio part");
        audio = Some(UploadedAudio::new(filename, data));
    }

    Ok(audio)
}

/// Transcribe and summarize an uploaded recording
#[post("/upload")]
pub async fn upload(mut payload: Multipart, state: web::Data<AppState>) -> HttpResponse {
    let audio = match read_audio_field(&mut payload, &state.config).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!(error = %e, "Failed to read upload");
            return error_response(&e);
        }
    };

    match state.workflow.process(audio).await {
        Ok(output) => HttpResponse::Ok().json(UploadResponse::new(output.transcript, output.summary)),
        Err(e) => error_response(&e),
    }
}
