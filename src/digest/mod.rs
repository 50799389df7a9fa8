//! Daily error digest
//!
//! Turns a paginated, newest-first error log into a bounded sequence of
//! per-day digest groups.
//!
//! # Pipeline
//!
//! ```text
//! ErrorLog::fetch_page → RecordStream → PageCeiling → DayGrouper → take(max_items)
//! ```
//!
//! Every stage is a pull iterator: a page is only fetched when the grouper
//! needs another record, and the grouper only runs when the caller asks for
//! another group. Nothing buffers more than one page of the log.
//!
//! Two independent ceilings bound a render: `max_pages` caps the log scan,
//! `max_items` caps the feed size.

mod grouper;
mod limits;
mod render;
mod stream;

pub use grouper::{digest_title, DayGrouper, DigestGroup};
pub use limits::{DigestLimits, InvalidLimits};
pub use render::{humane_error_type, render_record, LIST_END, LIST_START};
pub use stream::{PageCeiling, PagedRecord, RecordStream};
