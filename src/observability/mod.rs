//! Observability for errdigest
//!
//! - Structured logging (JSON lines)
//! - Counters for feed rendering
//! - Begin/complete scopes around operations
//!
//! # Usage
//!
//! ```ignore
//! use errdigest::observability::{Logger, Event, ObservationScope};
//!
//! Logger::info(Event::ConfigLoaded.as_str(), &[("log_path", "errors.jsonl")]);
//!
//! let scope = ObservationScope::new("FEED_RENDER");
//! // ... render ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{FeedMetrics, MetricsSnapshot};
pub use scope::ObservationScope;

/// Log an event at INFO, or ERROR when the event reports a failure
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
