use thiserror::Error;

/// Custom error type for persistence configuration.
#[derive(Error, Debug)]
pub enum DbError {
    /// The connection string does not start with a supported backend scheme.
    #[error("Unsupported backend: {0}")]
    UnsupportedBackend(String),
    /// Options could not be loaded (e.g., missing environment variable).
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
