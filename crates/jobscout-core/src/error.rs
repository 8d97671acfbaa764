//! Core error types for JobScout.
//!
//! This module defines the error type shared across collaborator boundaries.
//! Each variant names the subsystem that produced the failure.

use thiserror::Error;

/// Central error type for collaborator operations.
#[derive(Error, Debug)]
pub enum JobScoutError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store could not load targets or record a posting
    #[error("database error: {0}")]
    Database(String),

    /// The digest could not be built or delivered
    #[error("notification error: {0}")]
    Notification(String),

    /// A target, role or posting failed its constructor checks
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `JobScoutError`.
pub type Result<T> = std::result::Result<T, JobScoutError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
