//! Error types for alarm-core

use thiserror::Error;

/// Result type alias using alarm-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in alarm-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Alarm not found
    #[error("Alarm not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Notification scheduler error
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}
