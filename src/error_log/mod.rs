//! Error log storage
//!
//! The error log is the paginated source the digest feed is rendered from.
//! Every store serves pages newest-first: page 0 holds the most recently
//! logged errors.
//!
//! # Stores
//!
//! - [`MemoryErrorLog`]: bounded in-memory ring of recent errors
//! - [`FileErrorLog`]: append-only JSON-lines file

mod errors;
mod file;
mod memory;
mod record;

pub use errors::{ErrorLogError, ErrorLogResult};
pub use file::FileErrorLog;
pub use memory::MemoryErrorLog;
pub use record::ErrorRecord;

/// Read/append access to a paginated error log.
///
/// Implementations must return pages in a stable newest-first order so that
/// calendar days never increase from one record to the next. The digest
/// grouping relies on that ordering and does not re-validate it.
pub trait ErrorLog: Send + Sync {
    /// Name of the application whose errors this log holds.
    fn application_name(&self) -> &str;

    /// Fetches one page of records.
    ///
    /// Returns at most `page_size` records. An empty page signals the end
    /// of the log.
    fn fetch_page(&self, page_index: usize, page_size: usize) -> ErrorLogResult<Vec<ErrorRecord>>;

    /// Looks up a single record by id.
    fn get(&self, id: &str) -> ErrorLogResult<Option<ErrorRecord>>;

    /// Appends a record to the log.
    fn log(&self, record: ErrorRecord) -> ErrorLogResult<()>;
}

/// Slices page `page_index` out of a newest-first sequence.
pub(crate) fn page_bounds(len: usize, page_index: usize, page_size: usize) -> std::ops::Range<usize> {
    let start = page_index.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}
