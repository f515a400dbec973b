//! Error types for hostcfg-core

/// Result type for hostcfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in hostcfg-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown host or invalid server record
    #[error(transparent)]
    Meta(#[from] hostcfg_meta::Error),

    /// Filesystem, settings or backup error
    #[error(transparent)]
    Fs(#[from] hostcfg_fs::Error),

    /// Host file read or write error
    #[error(transparent)]
    Hosts(#[from] hostcfg_hosts::Error),

    /// Invalid server name pattern
    #[error("Invalid server pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether this is a field validation failure, raised before any file
    /// is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Meta(hostcfg_meta::Error::Validation { .. })
                | Error::Hosts(hostcfg_hosts::Error::Meta(
                    hostcfg_meta::Error::Validation { .. }
                ))
        )
    }
}
