//! # Image Uploads
//!
//! Writes uploaded horse images into the configured upload directory.
//!
//! ```text
//! client filename          stored as            on disk
//! ─────────────────        ─────────────        ─────────────────────────────
//! "My Horse.JPG"      ──►  "My_Horse.JPG"  ──►  static/uploads/My_Horse.JPG
//! "../../etc/passwd"  ──►  "etc_passwd"    ──►  static/uploads/etc_passwd
//! ```
//!
//! Two uploads that sanitize to the same name share one file: the later one
//! wins. Files are never deleted, not even when their horse is.

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tracing::{debug, info};

use paddock_core::validation::{validate_upload_filename, ValidationResult};

/// A file part received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename as sent by the browser. Untrusted.
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    /// The name this upload will be stored under.
    ///
    /// Fails for an empty client filename and for one with nothing usable
    /// left after sanitizing.
    pub fn stored_name(&self) -> ValidationResult<String> {
        validate_upload_filename(&self.file_name)
    }
}

/// The upload directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ImageStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory (and parents) if missing.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        debug!(dir = %self.dir.display(), "Upload directory ready");
        Ok(())
    }

    /// Full path for a stored image name.
    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.dir.join(stored_name)
    }

    /// Writes `bytes` under `stored_name`, replacing any existing file.
    ///
    /// `stored_name` must come from [`UploadedImage::stored_name`].
    pub async fn save(&self, stored_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_for(stored_name);
        tokio::fs::write(&path, bytes).await?;

        info!(file = %stored_name, size = bytes.len(), "Image saved");
        Ok(path)
    }
}
