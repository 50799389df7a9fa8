//! Observable events
//!
//! Every structured log line names one of these events.

use std::fmt;

/// Observable events in errdigest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// HTTP server bound and serving
    ServerStart,
    /// HTTP server stopped
    ServerStop,

    // Digest rendering
    /// One log page fetched
    PageFetched,
    /// One digest group sealed
    GroupSealed,
    /// Page ceiling cut the scan short
    PageCeilingReached,
    /// Error log fetch failed
    StoreFailure,

    // Error log writes
    /// Record appended to the error log
    RecordLogged,

    // HTTP
    /// Detail lookup for an unknown id
    RecordNotFound,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::ServerStop => "SERVER_STOP",
            Event::PageFetched => "PAGE_FETCHED",
            Event::GroupSealed => "GROUP_SEALED",
            Event::PageCeilingReached => "PAGE_CEILING_REACHED",
            Event::StoreFailure => "STORE_FAILURE",
            Event::RecordLogged => "RECORD_LOGGED",
            Event::RecordNotFound => "RECORD_NOT_FOUND",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::StoreFailure)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
