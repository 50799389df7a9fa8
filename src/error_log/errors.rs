//! # Error Log Errors
//!
//! Failures raised by error log stores.

use std::io;

use thiserror::Error;

/// Result type for error log operations
pub type ErrorLogResult<T> = Result<T, ErrorLogError>;

/// Error log store failures
///
/// None of these are retried by the digest; a failed fetch fails the whole
/// render.
#[derive(Debug, Error)]
pub enum ErrorLogError {
    /// Underlying file I/O failed
    #[error("Error log I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A stored record could not be decoded
    #[error("Corrupt error log entry at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// A record could not be encoded for storage
    #[error("Failed to encode error record: {0}")]
    Encode(String),

    /// The store cannot serve requests right now
    #[error("Error log unavailable: {0}")]
    Unavailable(String),
}

impl ErrorLogError {
    /// Short machine-readable code used in structured logs
    pub fn code(&self) -> &'static str {
        match self {
            ErrorLogError::Io(_) => "ERRDIGEST_LOG_IO",
            ErrorLogError::Corrupt { .. } => "ERRDIGEST_LOG_CORRUPT",
            ErrorLogError::Encode(_) => "ERRDIGEST_LOG_ENCODE",
            ErrorLogError::Unavailable(_) => "ERRDIGEST_LOG_UNAVAILABLE",
        }
    }
}
