//! One digest feed render
//!
//! Drives the digest pipeline against an error log and assembles the result:
//!
//! ```text
//! RecordStream → PageCeiling → DayGrouper → take(max_items) → build_item → build_channel
//! ```
//!
//! A store failure anywhere in the scan fails the whole render. The returned
//! document has already had XML-illegal characters stripped.

use std::env;

use url::Url;

use super::errors::FeedResult;
use super::links::LinkResolver;
use super::rss::{build_channel, build_item, FeedItem};
use crate::digest::{render_record, DayGrouper, DigestLimits, RecordStream};
use crate::error_log::{ErrorLog, ErrorRecord};
use crate::markup::strip_illegal_xml_chars;
use crate::observability::{log_event, Event, ObservationScope};

/// Media type of the rendered document
pub const CONTENT_TYPE: &str = "application/xml";
/// Character encoding of the rendered document
pub const CHARSET: &str = "utf-8";
/// Channel description
pub const CHANNEL_DESCRIPTION: &str = "Daily digest of application errors";

/// Channel title for an application running on a machine
pub fn channel_title(application: &str, machine: &str) -> String {
    format!("Daily digest of errors in {} on {}", application, machine)
}

/// Host name from the environment, falling back to `localhost`
pub fn default_machine_name() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Channel-level settings for a render
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Link of the channel itself
    pub channel_link: Url,
    /// Machine named in the channel title
    pub machine_name: String,
    pub limits: DigestLimits,
}

impl FeedSettings {
    pub fn new(channel_link: Url) -> Self {
        Self {
            channel_link,
            machine_name: default_machine_name(),
            limits: DigestLimits::default(),
        }
    }

    pub fn with_machine_name(mut self, machine_name: impl Into<String>) -> Self {
        self.machine_name = machine_name.into();
        self
    }

    pub fn with_limits(mut self, limits: DigestLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// What a render read and produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestStats {
    pub pages_fetched: usize,
    pub records_read: usize,
    pub groups_emitted: usize,
    pub page_ceiling_reached: bool,
}

/// A rendered feed ready for the response boundary
#[derive(Debug, Clone)]
pub struct FeedDocument {
    /// XML text, free of characters illegal in XML 1.0
    pub body: String,
    pub stats: DigestStats,
}

impl FeedDocument {
    /// `Content-Type` header value
    pub fn content_type(&self) -> String {
        format!("{}; charset={}", CONTENT_TYPE, CHARSET)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body.into_bytes()
    }
}

/// Render the daily digest feed of `log`.
pub fn render_digest_feed<L, R>(log: &L, links: &R, settings: &FeedSettings) -> FeedResult<FeedDocument>
where
    L: ErrorLog + ?Sized,
    R: LinkResolver + ?Sized,
{
    settings.limits.validate()?;
    let limits = settings.limits;

    let scope = ObservationScope::with_fields(
        "FEED_RENDER",
        &[("application", log.application_name())],
    );

    let records = RecordStream::new(log, limits.page_size).with_page_ceiling(limits.max_pages);
    let mut grouper = DayGrouper::new(records, |record: &ErrorRecord| {
        render_record(record, &links.resolve(record))
    });

    let items: Result<Vec<FeedItem>, _> = grouper
        .by_ref()
        .take(limits.max_items)
        .map(|group| group.map(|g| build_item(&g.title, &g.body, g.published)))
        .collect();

    let items = match items {
        Ok(items) => items,
        Err(e) => {
            let reason = e.to_string();
            log_event(Event::StoreFailure, &[("code", e.code()), ("reason", &reason)]);
            scope.fail(&reason);
            return Err(e.into());
        }
    };

    let bounded = grouper.source();
    let stats = DigestStats {
        pages_fetched: bounded.stream().pages_fetched(),
        records_read: bounded.stream().records_read(),
        groups_emitted: items.len(),
        page_ceiling_reached: bounded.ceiling_reached(),
    };

    if stats.page_ceiling_reached {
        let max_pages = limits.max_pages.to_string();
        log_event(Event::PageCeilingReached, &[("max_pages", &max_pages)]);
    }

    let title = channel_title(log.application_name(), &settings.machine_name);
    let channel = build_channel(&title, &settings.channel_link, CHANNEL_DESCRIPTION, items);
    let body = strip_illegal_xml_chars(&channel.to_xml());

    let pages = stats.pages_fetched.to_string();
    let groups = stats.groups_emitted.to_string();
    scope.complete_with_fields(&[("pages", &pages), ("groups", &groups)]);

    Ok(FeedDocument { body, stats })
}
