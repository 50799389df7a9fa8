//! Feed metrics
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics; exact totals are not required between reads

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for digest feed rendering
#[derive(Debug, Default)]
pub struct FeedMetrics {
    feeds_rendered: AtomicU64,
    feeds_failed: AtomicU64,
    pages_fetched: AtomicU64,
    records_read: AtomicU64,
    groups_emitted: AtomicU64,
    records_logged: AtomicU64,
}

/// Point-in-time copy of [`FeedMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub feeds_rendered: u64,
    pub feeds_failed: u64,
    pub pages_fetched: u64,
    pub records_read: u64,
    pub groups_emitted: u64,
    pub records_logged: u64,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful render and the work it did
    pub fn record_render(&self, pages_fetched: usize, records_read: usize, groups_emitted: usize) {
        self.feeds_rendered.fetch_add(1, Ordering::Relaxed);
        self.pages_fetched.fetch_add(pages_fetched as u64, Ordering::Relaxed);
        self.records_read.fetch_add(records_read as u64, Ordering::Relaxed);
        self.groups_emitted.fetch_add(groups_emitted as u64, Ordering::Relaxed);
    }

    pub fn increment_feeds_failed(&self) {
        self.feeds_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_records_logged(&self) {
        self.records_logged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            feeds_rendered: self.feeds_rendered.load(Ordering::Relaxed),
            feeds_failed: self.feeds_failed.load(Ordering::Relaxed),
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            records_read: self.records_read.load(Ordering::Relaxed),
            groups_emitted: self.groups_emitted.load(Ordering::Relaxed),
            records_logged: self.records_logged.load(Ordering::Relaxed),
        }
    }
}
