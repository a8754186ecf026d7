//! Transient storage for uploaded audio
//!
//! Every stored file is owned by a [`StoredAudioFile`] guard. The guard deletes the
//! file exactly once: explicitly through [`StoredAudioFile::remove`] on the success
//! path, or on drop for every other exit (errors, early returns, panics).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;
use voxbrief_common::{Result, VoxbriefError};
use voxbrief_stt::audio_extension;

/// Strip path components and unsafe characters from a client filename
///
/// Separators become spaces, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are trimmed.
/// May return an empty string.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Storage name for an upload: `<uuid>_<secured name>`
///
/// Falls back to `upload.<ext>` when sanitizing empties the name or loses the
/// audio extension the remote service needs.
pub fn storage_name(original: &str) -> String {
    let secured = secure_filename(original);
    let ext = audio_extension(original).unwrap_or_default();

    let base = if secured.is_empty() || audio_extension(&secured).unwrap_or_default() != ext {
        if ext.is_empty() {
            "upload".to_string()
        } else {
            format!("upload.{}", ext)
        }
    } else {
        secured
    };

    format!("{}_{}", Uuid::new_v4().simple(), base)
}

/// Directory holding in-flight uploads
#[derive(Debug, Clone)]
pub struct TransientStorage {
    dir: PathBuf,
}

impl TransientStorage {
    /// Create storage rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            VoxbriefError::config(format!(
                "Failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    /// Upload directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` under a sanitized name derived from `filename`
    ///
    /// A partially written file is removed before the error is returned.
    pub async fn store(&self, filename: &str, data: &[u8]) -> Result<StoredAudioFile> {
        let stored = StoredAudioFile::new(self.dir.join(storage_name(filename)));
        tokio::fs::write(stored.path(), data).await?;

        debug!(path = %stored.path().display(), bytes = data.len(), "Upload stored");
        Ok(stored)
    }
}

/// A stored upload that must not outlive its request
#[derive(Debug)]
pub struct StoredAudioFile {
    path: PathBuf,
    removed: bool,
}

impl StoredAudioFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            removed: false,
        }
    }

    /// Location on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, treating an already-absent file as success
    pub async fn remove(mut self) -> Result<()> {
        self.removed = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Upload removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Upload already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for StoredAudioFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;

        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Upload removed on early exit"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Upload already absent")
            }
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove upload"),
        }
    }
}
