//! Error types for hostcfg-meta

/// Result type for hostcfg-meta operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Unknown host: {host}")]
    UnknownHost { host: String },

    #[error("Invalid configuration for {host}: field '{field}' {reason}")]
    Validation {
        host: String,
        field: String,
        reason: String,
    },

    #[error("Invalid server record '{name}': {message}")]
    InvalidRecord { name: String, message: String },
}

impl Error {
    pub fn validation(
        host: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            host: host.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
