//! Digest Feed HTTP Routes
//!
//! - `GET /digest.rss` (alias `/digestrss`): daily digest RSS feed
//! - `GET /detail?id=`: the error record a feed entry links to
//!
//! Rendering reads the error log synchronously, so it runs on the blocking
//! pool. A store failure answers 500 and never a partial feed.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error_log::ErrorLog;
use crate::feed::{render_digest_feed, FeedSettings, LinkResolver};
use crate::observability::{log_event, Event, FeedMetrics};

/// Shared state for digest handlers
pub struct DigestState {
    pub log: Arc<dyn ErrorLog>,
    pub links: Arc<dyn LinkResolver>,
    pub settings: FeedSettings,
    pub metrics: Arc<FeedMetrics>,
}

impl DigestState {
    pub fn new(log: Arc<dyn ErrorLog>, links: Arc<dyn LinkResolver>, settings: FeedSettings) -> Self {
        Self {
            log,
            links,
            settings,
            metrics: Arc::new(FeedMetrics::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: String,
}

/// Create digest routes
pub fn digest_routes(state: Arc<DigestState>) -> Router {
    Router::new()
        .route("/digest.rss", get(digest_feed_handler))
        .route("/digestrss", get(digest_feed_handler))
        .route("/detail", get(detail_handler))
        .with_state(state)
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}

async fn digest_feed_handler(State(state): State<Arc<DigestState>>) -> Response {
    let render_state = state.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        render_digest_feed(
            render_state.log.as_ref(),
            render_state.links.as_ref(),
            &render_state.settings,
        )
    })
    .await;

    match rendered {
        Ok(Ok(document)) => {
            let stats = document.stats;
            state
                .metrics
                .record_render(stats.pages_fetched, stats.records_read, stats.groups_emitted);
            let content_type = document.content_type();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                document.into_bytes(),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            state.metrics.increment_feeds_failed();
            internal_error(format!("Failed to render error digest: {}", e))
        }
        Err(e) => {
            state.metrics.increment_feeds_failed();
            let reason = e.to_string();
            log_event(Event::StoreFailure, &[("reason", &reason)]);
            internal_error("Failed to render error digest".to_string())
        }
    }
}

async fn detail_handler(
    State(state): State<Arc<DigestState>>,
    Query(query): Query<DetailQuery>,
) -> Response {
    let lookup_state = state.clone();
    let id = query.id.clone();
    let found = tokio::task::spawn_blocking(move || lookup_state.log.get(&id)).await;

    match found {
        Ok(Ok(Some(record))) => (StatusCode::OK, Json(record)).into_response(),
        Ok(Ok(None)) => {
            log_event(Event::RecordNotFound, &[("id", &query.id)]);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "error record not found", "id": query.id })),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            let reason = e.to_string();
            log_event(Event::StoreFailure, &[("code", e.code()), ("reason", &reason)]);
            internal_error(format!("Failed to read error log: {}", e))
        }
        Err(e) => internal_error(format!("Failed to read error log: {}", e)),
    }
}
