//! Error types for hostcfg-hosts

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Meta(#[from] hostcfg_meta::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] hostcfg_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backup failed for {host}, nothing was written: {source}")]
    Backup {
        host: String,
        #[source]
        source: hostcfg_fs::Error,
    },

    #[error("Failed to read {host} configuration at {path}: {message}")]
    ConfigurationRead {
        host: String,
        path: PathBuf,
        message: String,
    },

    #[error("Failed to write {host} configuration at {path}: {message}")]
    ConfigurationWrite {
        host: String,
        path: PathBuf,
        message: String,
    },

    #[error("{host} has no configuration location on this platform")]
    UnsupportedPlatform { host: String },

    #[error("Home directory not found")]
    HomeDirNotFound,
}
