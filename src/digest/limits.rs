//! Digest limits

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size for log fetches
pub const DEFAULT_PAGE_SIZE: usize = 30;
/// Maximum pages read per render
pub const DEFAULT_MAX_PAGES: usize = 30;
/// Maximum digest groups per feed
pub const DEFAULT_MAX_ITEMS: usize = 30;

/// Bounds applied to a single digest render.
///
/// The page ceiling and the item ceiling guard different costs (log scan
/// versus feed size) and are tuned independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestLimits {
    /// Records requested per page fetch
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pages read before the scan stops
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Digest groups emitted before the feed stops
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

impl Default for DigestLimits {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            max_items: default_max_items(),
        }
    }
}

/// A limit was zero
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid digest limits: {field} must be > 0")]
pub struct InvalidLimits {
    pub field: &'static str,
}

impl DigestLimits {
    pub fn new(page_size: usize, max_pages: usize, max_items: usize) -> Self {
        Self {
            page_size,
            max_pages,
            max_items,
        }
    }

    /// Every limit must be positive.
    pub fn validate(&self) -> Result<(), InvalidLimits> {
        if self.page_size == 0 {
            return Err(InvalidLimits { field: "page_size" });
        }
        if self.max_pages == 0 {
            return Err(InvalidLimits { field: "max_pages" });
        }
        if self.max_items == 0 {
            return Err(InvalidLimits { field: "max_items" });
        }
        Ok(())
    }
}
