//! Upload validation
//!
//! Pure checks over the submitted file-part metadata; nothing here touches disk.

use voxbrief_common::{Result, VoxbriefError};
use voxbrief_stt::is_supported_audio;

use crate::types::UploadedAudio;

/// Validate an upload and return its client filename
///
/// * no `audio_file` part -> `NoFileUploaded`
/// * missing or empty filename -> `NoFileSelected`
/// * extension absent or not an accepted audio format -> `InvalidFileType`
pub fn validate_upload(upload: Option<&UploadedAudio>) -> Result<&str> {
    let upload = upload.ok_or(VoxbriefError::NoFileUploaded)?;

    let filename = match upload.filename.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(VoxbriefError::NoFileSelected),
    };

    if !is_supported_audio(filename) {
        return Err(VoxbriefError::InvalidFileType);
    }

    Ok(filename)
}
