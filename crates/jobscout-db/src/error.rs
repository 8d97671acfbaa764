//! Database error types.

use jobscout_core::JobScoutError;
use thiserror::Error;

/// Database-specific errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to open or create database connection.
    #[error("failed to open database: {0}")]
    Open(String),

    /// Migration execution failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// Requested record was not found.
    #[error("{0}")]
    NotFound(String),

    /// A row with the same unique value already exists.
    #[error("already exists: {0}")]
    Duplicate(String),

    /// Input rejected before reaching the database.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// Failed to decode database value.
    #[error("decode error: {0}")]
    Decode(String),

    /// Underlying `SQLx` error.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// I/O error during database operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;

impl From<DatabaseError> for JobScoutError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Invalid(msg) => JobScoutError::Validation(msg),
            other => JobScoutError::Database(other.to_string()),
        }
    }
}
