//! Links from feed entries to error details

use url::Url;

use super::errors::{FeedError, FeedResult};
use crate::error_log::ErrorRecord;

/// Resolves the absolute link a digest entry points at.
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, record: &ErrorRecord) -> Url;
}

/// Links each record to `{base}/detail?id={id}`.
#[derive(Debug, Clone)]
pub struct DetailLinkResolver {
    base: Url,
}

impl DetailLinkResolver {
    /// `base` must be a hierarchical URL such as `http://host/errors/`.
    pub fn new(base: Url) -> FeedResult<Self> {
        if base.cannot_be_a_base() {
            return Err(FeedError::InvalidLink(base.to_string()));
        }
        Ok(Self { base })
    }

    /// Parse and validate `base`.
    pub fn parse(base: &str) -> FeedResult<Self> {
        let url = Url::parse(base).map_err(|e| FeedError::InvalidLink(format!("{}: {}", base, e)))?;
        Self::new(url)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl LinkResolver for DetailLinkResolver {
    fn resolve(&self, record: &ErrorRecord) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("detail");
        }
        url.set_fragment(None);
        url.query_pairs_mut().clear().append_pair("id", &record.id);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn record(id: &str) -> ErrorRecord {
        let time = DateTime::parse_from_rfc3339("2024-01-02T10:00:00Z").unwrap();
        ErrorRecord::new(time, "System.Foo", "m").with_id(id)
    }

    #[test]
    fn test_detail_link_from_root() {
        let links = DetailLinkResolver::parse("http://localhost:54321/").unwrap();
        assert_eq!(
            links.resolve(&record("42")).as_str(),
            "http://localhost:54321/detail?id=42"
        );
    }

    #[test]
    fn test_detail_link_under_prefix() {
        let with_slash = DetailLinkResolver::parse("https://example.com/elmah/").unwrap();
        let without_slash = DetailLinkResolver::parse("https://example.com/elmah?x=1#top").unwrap();

        assert_eq!(
            with_slash.resolve(&record("a b")).as_str(),
            "https://example.com/elmah/detail?id=a+b"
        );
        assert_eq!(
            without_slash.resolve(&record("7")).as_str(),
            "https://example.com/elmah/detail?id=7"
        );
    }

    #[test]
    fn test_non_hierarchical_base_rejected() {
        assert!(matches!(
            DetailLinkResolver::parse("mailto:ops@example.com"),
            Err(FeedError::InvalidLink(_))
        ));
        assert!(DetailLinkResolver::parse("not a url").is_err());
    }
}
