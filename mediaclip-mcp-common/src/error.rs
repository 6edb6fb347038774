//! Error types for the common library.
//!
//! This module provides a unified error hierarchy using `thiserror` for
//! consistent error handling and reporting across the mediaclip server.
//!
//! # Error Categories
//!
//! - `ConfigError`: Missing or invalid configuration
//! - `Error::Validation`: Input validation failures (malformed timestamps,
//!   non-positive durations, bad naming patterns)
//! - `Error::NotFound`: A referenced input file does not exist
//! - `Error::Ffmpeg`: FFmpeg/FFprobe execution errors
//! - `Error::Io`: File system operations
//! - `Error::Json`: Metadata serialization failures

use thiserror::Error;

/// Unified error type for the mediaclip server.
///
/// Every failure reported to an MCP caller originates as one of these
/// variants; the server layer classifies them into JSON-RPC error codes.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (missing env vars, invalid values)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced input file does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// FFmpeg/FFprobe execution errors
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// File system I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization errors (metadata records)
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```
    /// use mediaclip_mcp_common::error::Error;
    ///
    /// let err = Error::validation("segment_duration must be positive");
    /// assert!(err.to_string().contains("segment_duration"));
    /// ```
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Create a new not-found error for an input path.
    ///
    /// # Example
    ///
    /// ```
    /// use mediaclip_mcp_common::error::Error;
    ///
    /// let err = Error::not_found("/media/missing.mp4");
    /// assert!(err.to_string().contains("/media/missing.mp4"));
    /// ```
    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound(path.into())
    }

    /// Create a new FFmpeg error.
    pub fn ffmpeg(message: impl Into<String>) -> Self {
        Error::Ffmpeg(message.into())
    }
}

/// Configuration errors.
///
/// These errors occur when loading or validating configuration from
/// environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Required environment variable {0} is not set")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Create a new missing environment variable error.
    pub fn missing_env_var(name: impl Into<String>) -> Self {
        ConfigError::MissingEnvVar(name.into())
    }

    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
