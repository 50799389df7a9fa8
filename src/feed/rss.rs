//! RSS feed assembly
//!
//! Builds an RSS 0.91 document by hand. The structure is small and fixed,
//! so every value goes through [`escape_xml_text`] on the way out and no
//! XML tree is kept in memory.

use chrono::{DateTime, Utc};
use url::Url;

use crate::markup::escape_xml_text;

const RSS_VERSION: &str = "0.91";
const LANGUAGE: &str = "en";

/// One feed entry
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    /// HTML markup, escaped as text when serialized
    pub description: String,
    pub pub_date: DateTime<Utc>,
}

/// A complete feed channel
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub title: String,
    pub link: Url,
    pub description: String,
    pub items: Vec<FeedItem>,
}

/// Build one feed item from a digest title, body markup and publication time.
pub fn build_item(title: &str, body_markup: &str, published: DateTime<Utc>) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        description: body_markup.to_string(),
        pub_date: published,
    }
}

/// Wrap `items` in a channel.
pub fn build_channel(
    title: &str,
    link: &Url,
    description: &str,
    items: impl IntoIterator<Item = FeedItem>,
) -> Channel {
    Channel {
        title: title.to_string(),
        link: link.clone(),
        description: description.to_string(),
        items: items.into_iter().collect(),
    }
}

/// RFC 1123 date as used by `pubDate`, e.g. `Tue, 02 Jan 2024 10:00:00 GMT`
pub fn rfc1123(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn push_element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape_xml_text(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

impl Channel {
    /// Serialize the channel as a UTF-8 RSS document.
    pub fn to_xml(&self) -> String {
        let body_len: usize = self.items.iter().map(|i| i.description.len() + 128).sum();
        let mut out = String::with_capacity(256 + body_len);

        out.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        out.push_str(r#"<rss version=""#);
        out.push_str(RSS_VERSION);
        out.push_str(r#""><channel>"#);

        push_element(&mut out, "title", &self.title);
        push_element(&mut out, "link", self.link.as_str());
        push_element(&mut out, "description", &self.description);
        push_element(&mut out, "language", LANGUAGE);

        for item in &self.items {
            out.push_str("<item>");
            push_element(&mut out, "title", &item.title);
            push_element(&mut out, "description", &item.description);
            push_element(&mut out, "pubDate", &rfc1123(item.pub_date));
            out.push_str("</item>");
        }

        out.push_str("</channel></rss>");
        out
    }
}
