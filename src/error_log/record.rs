//! Error record model

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged error occurrence.
///
/// The timestamp keeps the offset it was logged with; grouping always works
/// on its UTC normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Unique id within the log
    pub id: String,
    /// When the error occurred
    pub time: DateTime<FixedOffset>,
    /// Exception type identifier, e.g. `System.InvalidOperationException`
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable message
    pub message: String,
    /// Application the error was raised in
    #[serde(default)]
    pub application: String,
    /// Host that raised the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Component or assembly that raised the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Full detail text (stack trace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorRecord {
    /// Create a record with a fresh id.
    pub fn new(
        time: DateTime<FixedOffset>,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            time,
            error_type: error_type.into(),
            message: message.into(),
            application: String::new(),
            host: None,
            source: None,
            detail: None,
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    /// Timestamp normalized to UTC
    pub fn utc_time(&self) -> DateTime<Utc> {
        self.time.with_timezone(&Utc)
    }

    /// UTC calendar day the error belongs to
    pub fn utc_day(&self) -> NaiveDate {
        self.utc_time().date_naive()
    }
}
