//! HTTP Digest Feed Tests
//!
//! Drives the axum router directly with `oneshot`:
//! - feed content type and body
//! - store failures surface as 500 with no partial feed
//! - detail links resolve to the logged record
//! - metrics reflect renders

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use errdigest::error_log::{
    ErrorLog, ErrorLogError, ErrorLogResult, ErrorRecord, FileErrorLog, MemoryErrorLog,
};
use errdigest::feed::{DetailLinkResolver, FeedSettings};
use errdigest::http_server::{DigestState, HttpServer, HttpServerConfig};
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

// =============================================================================
// Test Utilities
// =============================================================================

const BASE: &str = "http://feeds.example.com/errors/";

struct UnavailableLog;

impl ErrorLog for UnavailableLog {
    fn application_name(&self) -> &str {
        "shop"
    }

    fn fetch_page(&self, _page_index: usize, _page_size: usize) -> ErrorLogResult<Vec<ErrorRecord>> {
        Err(ErrorLogError::Unavailable("database offline".to_string()))
    }

    fn get(&self, _id: &str) -> ErrorLogResult<Option<ErrorRecord>> {
        Err(ErrorLogError::Unavailable("database offline".to_string()))
    }

    fn log(&self, _record: ErrorRecord) -> ErrorLogResult<()> {
        Err(ErrorLogError::Unavailable("database offline".to_string()))
    }
}

fn record(time: &str, error_type: &str, message: &str, id: &str) -> ErrorRecord {
    let time = DateTime::parse_from_rfc3339(time).unwrap();
    ErrorRecord::new(time, error_type, message).with_id(id)
}

fn router(log: Arc<dyn ErrorLog>) -> Router {
    let base = Url::parse(BASE).unwrap();
    let state = DigestState::new(
        log,
        Arc::new(DetailLinkResolver::new(base.clone()).unwrap()),
        FeedSettings::new(base).with_machine_name("web-1"),
    );
    HttpServer::new(HttpServerConfig::default(), state).router()
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

fn populated_log() -> Arc<MemoryErrorLog> {
    let log = Arc::new(MemoryErrorLog::new("shop"));
    // Logged oldest first; served newest first
    log.log(record("2024-01-01T08:00:00Z", "System.Foo", "c", "3")).unwrap();
    log.log(record("2024-01-02T09:00:00Z", "System.Bar", "b", "2")).unwrap();
    log.log(record("2024-01-02T10:00:00Z", "System.Foo", "a", "1")).unwrap();
    log
}

// =============================================================================
// Feed
// =============================================================================

#[tokio::test]
async fn test_feed_served_as_utf8_xml() {
    let (status, content_type, body) = get(router(populated_log()), "/digest.rss").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/xml; charset=utf-8"));
    assert!(body.starts_with(r#"<?xml version="1.0" encoding="utf-8"?><rss version="0.91">"#));
    assert!(body.contains("<title>Daily digest of errors in shop on web-1</title>"));
    assert!(body.contains(&format!("<link>{}</link>", BASE)));
    assert_eq!(body.matches("<item>").count(), 2);

    // Newest day first, first record seen dates the item
    let first = body.find("Digest for 2024-01-02").unwrap();
    let second = body.find("Digest for 2024-01-01").unwrap();
    assert!(first < second);
    assert!(body.contains("<pubDate>Tue, 02 Jan 2024 10:00:00 GMT</pubDate>"));

    // Fragment markup is carried as escaped text
    assert!(body.contains(
        "&lt;span title='System.Foo'&gt;Foo&lt;/span&gt;: \
         &lt;a href='http://feeds.example.com/errors/detail?id=1'&gt;a&lt;/a&gt;"
    ));
}

#[tokio::test]
async fn test_feed_alias_route() {
    let (status, _, body) = get(router(populated_log()), "/digestrss").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<rss"));
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let (status, content_type, body) = get(router(Arc::new(UnavailableLog)), "/digest.rss").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert!(body.contains("database offline"));
    assert!(!body.contains("<rss"));
}

#[tokio::test]
async fn test_file_backed_feed() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(FileErrorLog::open("billing", dir.path().join("errors.jsonl")));
    log.log(record("2024-02-01T00:00:00Z", "IOException", "disk <full>", "x")).unwrap();

    let (status, _, body) = get(router(log), "/digest.rss").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Daily digest of errors in billing"));
    assert!(body.contains("&lt;span title='IOException'&gt;IO&lt;/span&gt;"));
    assert!(body.contains("disk &amp;lt;full&amp;gt;"));
}

// =============================================================================
// Detail
// =============================================================================

#[tokio::test]
async fn test_detail_returns_record() {
    let (status, _, body) = get(router(populated_log()), "/detail?id=2").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["id"], "2");
    assert_eq!(json["type"], "System.Bar");
}

#[tokio::test]
async fn test_detail_unknown_id_is_not_found() {
    let (status, _, _) = get(router(populated_log()), "/detail?id=nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Observability
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (status, _, body) = get(router(populated_log()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_metrics_count_renders() {
    let app = router(populated_log());

    let (status, _, _) = get(app.clone(), "/digest.rss").await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = get(app, "/metrics").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["feeds_rendered"], 1);
    assert_eq!(json["records_read"], 3);
    assert_eq!(json["groups_emitted"], 2);
    // Page 0 plus the empty page that ends the log
    assert_eq!(json["pages_fetched"], 2);
}
