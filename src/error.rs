//! Error types for the configuration contract

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Configuration contract errors
///
/// A document with missing or unknown keys is not an error: that outcome is
/// reported through [`crate::ValidationReport`].
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed version '{input}': {reason}")]
    MalformedVersion { input: String, reason: String },

    #[error(
        "Registry invariant violated: {set} key '{key}' of subsystem {subsystem} \
         is not a recognized key"
    )]
    RegistryInvariant {
        subsystem: String,
        key: String,
        set: String,
    },

    #[error("Unknown subsystem: {0} (expected 'core' or 'nlu')")]
    UnknownSubsystem(String),

    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config_crate::ConfigError),
}

impl SchemaError {
    pub(crate) fn malformed_version(input: &str, reason: impl Into<String>) -> Self {
        SchemaError::MalformedVersion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
