//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use serde_json::json;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response, write_text};
use crate::error_log::{ErrorLog, ErrorRecord};
use crate::feed::render_digest_feed;
use crate::http_server::{DigestState, HttpServer};
use crate::observability::{log_event, Event, Logger};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Render { config } => render(&config),
        Command::Log { config } => log(&config),
    }
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);
    log_event(Event::ConfigLoaded, &[("log_path", &config.log_path)]);
    Ok(config)
}

/// Serve the digest feed until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let state = DigestState::new(
        Arc::new(config.open_log()),
        Arc::new(config.link_resolver()?),
        config.feed_settings()?,
    );
    let server = HttpServer::new(config.http.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Render the feed once to stdout
pub fn render(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let log = config.open_log();
    let links = config.link_resolver()?;

    let document = render_digest_feed(&log, &links, &config.feed_settings()?)?;
    write_text(&document.body)
}

/// A record as accepted on stdin by `log`
#[derive(Debug, Deserialize)]
struct LogRequest {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    time: Option<DateTime<FixedOffset>>,
    #[serde(rename = "type")]
    error_type: String,
    message: String,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl LogRequest {
    fn into_record(self, application: &str) -> ErrorRecord {
        let time = self
            .time
            .unwrap_or_else(|| DateTime::<FixedOffset>::from(Utc::now()));
        let mut record =
            ErrorRecord::new(time, self.error_type, self.message).with_application(application);
        if let Some(id) = self.id {
            record = record.with_id(id);
        }
        ErrorRecord {
            host: self.host,
            source: self.source,
            detail: self.detail,
            ..record
        }
    }
}

/// Append one record from stdin to the error log
///
/// Answers on stdout with a JSON status line either way; a failure is also
/// returned so the process exits non-zero.
pub fn log(config_path: &Path) -> CliResult<()> {
    match append_request(config_path) {
        Ok(id) => write_response(json!({ "id": id })),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

fn append_request(config_path: &Path) -> CliResult<String> {
    let config = load_config(config_path)?;
    let request: LogRequest = serde_json::from_value(read_request()?)?;
    let record = request.into_record(&config.application_name);
    let id = record.id.clone();

    config.open_log().log(record)?;
    log_event(Event::RecordLogged, &[("id", &id)]);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_request_defaults() {
        let request: LogRequest =
            serde_json::from_str(r#"{"type": "System.Foo", "message": "boom"}"#).unwrap();
        let record = request.into_record("shop");

        assert_eq!(record.application, "shop");
        assert_eq!(record.error_type, "System.Foo");
        assert!(!record.id.is_empty());
        assert!(record.host.is_none());
    }

    #[test]
    fn test_log_request_keeps_supplied_fields() {
        let request: LogRequest = serde_json::from_str(
            r#"{"id": "42", "time": "2024-01-02T10:00:00+01:00", "type": "T", "message": "m", "host": "web-1", "source": "checkout", "detail": "at Foo()"}"#,
        )
        .unwrap();
        let record = request.into_record("shop");

        assert_eq!(record.id, "42");
        assert_eq!(record.time.to_rfc3339(), "2024-01-02T10:00:00+01:00");
        assert_eq!(record.host.as_deref(), Some("web-1"));
        assert_eq!(record.source.as_deref(), Some("checkout"));
        assert_eq!(record.detail.as_deref(), Some("at Foo()"));
        assert_eq!(record.application, "shop");
    }
}
