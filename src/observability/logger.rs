//! Structured JSON logger
//!
//! - One log line = one JSON object
//! - `event` first, then `severity` and `time`, then fields sorted by key
//! - ERROR goes to stderr, everything else to stdout
//! - Synchronous, no buffering

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-page and per-group detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

#[derive(Serialize)]
struct LogLine<'a> {
    event: &'a str,
    severity: &'static str,
    time: String,
    #[serde(flatten)]
    fields: BTreeMap<&'a str, &'a str>,
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Lowest severity that is written. Defaults to INFO.
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Whether a line at `severity` would be written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        if severity == Severity::Error {
            Self::log_to_writer(severity, event, fields, Utc::now(), &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, Utc::now(), &mut io::stdout());
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        time: DateTime<Utc>,
        writer: &mut W,
    ) {
        let line = LogLine {
            event,
            severity: severity.as_str(),
            time: time.to_rfc3339_opts(SecondsFormat::Millis, true),
            fields: fields
                .iter()
                .filter(|(k, _)| !matches!(*k, "event" | "severity" | "time"))
                .copied()
                .collect(),
        };

        let Ok(mut output) = serde_json::to_vec(&line) else {
            return;
        };
        output.push(b'\n');

        // Logging must never fail the caller
        let _ = writer.write_all(&output);
        let _ = writer.flush();
    }

    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let time = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
        .unwrap()
        .with_timezone(&Utc);
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, time, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert_eq!(Severity::from_u8(9), Severity::Error);
        assert_eq!(Severity::from_u8(Severity::Warn as u8), Severity::Warn);
    }

    #[test]
    fn test_trace_disabled_by_default() {
        assert!(!Logger::enabled(Severity::Trace));
        assert!(Logger::enabled(Severity::Info));
    }

    #[test]
    fn test_log_json_format() {
        let output = capture_log(Severity::Info, "FEED_RENDER_BEGIN", &[("pages", "2")]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "FEED_RENDER_BEGIN");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["time"], "2024-01-02T03:04:05.000Z");
        assert_eq!(parsed["pages"], "2");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = capture_log(Severity::Info, "TEST", &[("zebra", "1"), ("apple", "2")]);
        let output2 = capture_log(Severity::Info, "TEST", &[("apple", "2"), ("zebra", "1")]);
        assert_eq!(output1, output2);

        let event_pos = output1.find("\"event\"").unwrap();
        let apple_pos = output1.find("apple").unwrap();
        let zebra_pos = output1.find("zebra").unwrap();
        assert!(event_pos < apple_pos);
        assert!(apple_pos < zebra_pos);
    }

    #[test]
    fn test_reserved_field_names_are_dropped() {
        let output = capture_log(Severity::Info, "REAL", &[("event", "FAKE")]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "REAL");
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = capture_log(Severity::Info, "TEST", &[("message", "hello \"world\"\nline2")]);

        assert_eq!(output.chars().filter(|c| *c == '\n').count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["message"], "hello \"world\"\nline2");
    }
}
