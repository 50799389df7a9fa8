//! # Digest feed
//!
//! Assembles digest groups into an RSS document.
//!
//! - [`rss`]: feed item and channel building, XML serialization
//! - [`links`]: absolute links from feed entries to error details
//! - [`render_digest_feed`]: one complete render against an error log

mod digest_feed;
mod errors;
pub mod links;
pub mod rss;

pub use digest_feed::{
    channel_title, default_machine_name, render_digest_feed, DigestStats, FeedDocument,
    FeedSettings, CHANNEL_DESCRIPTION, CHARSET, CONTENT_TYPE,
};
pub use errors::{FeedError, FeedResult};
pub use links::{DetailLinkResolver, LinkResolver};
pub use rss::{build_channel, build_item, Channel, FeedItem};
