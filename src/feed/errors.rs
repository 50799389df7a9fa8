//! # Feed Errors

use thiserror::Error;

use crate::digest::InvalidLimits;
use crate::error_log::ErrorLogError;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed rendering errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// The error log failed mid-render; no partial feed is produced
    #[error("Error log read failed: {0}")]
    Store(#[from] ErrorLogError),

    #[error(transparent)]
    InvalidLimits(#[from] InvalidLimits),

    /// A link base cannot have paths appended to it
    #[error("Invalid feed link: {0}")]
    InvalidLink(String),
}

impl FeedError {
    /// Whether the failure came from the error log store
    pub fn is_store_failure(&self) -> bool {
        matches!(self, FeedError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_classification() {
        let err = FeedError::from(ErrorLogError::Unavailable("down".to_string()));
        assert!(err.is_store_failure());
        assert!(err.to_string().contains("down"));

        let err = FeedError::from(InvalidLimits { field: "page_size" });
        assert!(!err.is_store_failure());
        assert_eq!(err.to_string(), "Invalid digest limits: page_size must be > 0");
    }
}
