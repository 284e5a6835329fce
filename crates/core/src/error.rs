//! Error types for s3p-core
//!
//! Provides a unified error type for configuration, request and transfer failures.

use thiserror::Error;

/// Result type alias for s3p-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3p-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value is absent or empty
    #[error("{0} environment variable not set. You can also add it to a local .env file")]
    MissingConfig(&'static str),

    /// Configuration source could not be read
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Bucket or key would not map to a single object path
    #[error("Invalid object key '{0}': '.' and '..' path segments are not allowed")]
    InvalidKey(String),

    /// Presigned URL payload could not be decoded
    #[error("Error decoding presigned URL response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport-level failure: connection, TLS, body read
    #[error("Network error: {0}")]
    Network(String),
}
