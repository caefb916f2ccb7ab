//! Uploads Config

use std::path::PathBuf;

use clap::Args;

/// Uploaded file settings.
#[derive(Debug, Args)]
pub struct UploadsConfig {
    /// Directory uploaded files are stored under and served from
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Largest accepted upload in bytes
    #[arg(long, env = "UPLOAD_MAX_BYTES", default_value_t = 5 * 1024 * 1024)]
    pub upload_max_bytes: u64,
}
