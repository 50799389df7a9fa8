//! Paginated record stream
//!
//! [`RecordStream`] walks the log page by page, yielding each record tagged
//! with the page it came from. [`PageCeiling`] truncates the stream on the
//! consumer side: it stops before the stream would fetch a page at or past
//! the ceiling, so that page is never requested from the store.

use std::vec;

use crate::error_log::{ErrorLog, ErrorLogResult, ErrorRecord};
use crate::observability::{Event, Logger};

/// A record together with the index of the page it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct PagedRecord {
    pub page_index: usize,
    pub record: ErrorRecord,
}

/// Lazy page-by-page traversal of an error log.
///
/// Starts at page 0 and ends at the first empty page. A fetch failure is
/// yielded once and ends the stream; records of a failed page are never
/// yielded. Not restartable.
pub struct RecordStream<'a, L: ErrorLog + ?Sized> {
    log: &'a L,
    page_size: usize,
    /// Page the next fetch will request
    next_page: usize,
    /// Remaining records of the current page
    batch: vec::IntoIter<ErrorRecord>,
    batch_page: usize,
    pages_fetched: usize,
    records_read: usize,
    finished: bool,
}

impl<'a, L: ErrorLog + ?Sized> RecordStream<'a, L> {
    /// Create a stream over `log` reading `page_size` records per fetch.
    pub fn new(log: &'a L, page_size: usize) -> Self {
        debug_assert!(page_size > 0, "page size must be positive");
        Self {
            log,
            page_size,
            next_page: 0,
            batch: Vec::new().into_iter(),
            batch_page: 0,
            pages_fetched: 0,
            records_read: 0,
            finished: false,
        }
    }

    /// Truncate the stream after `max_pages` pages.
    pub fn with_page_ceiling(self, max_pages: usize) -> PageCeiling<'a, L> {
        PageCeiling::new(self, max_pages)
    }

    /// Page index the next pull would fetch.
    ///
    /// `None` while records of the current page remain, or once the stream
    /// has ended.
    pub fn pending_fetch(&self) -> Option<usize> {
        if self.finished || !self.batch.as_slice().is_empty() {
            None
        } else {
            Some(self.next_page)
        }
    }

    /// Number of page fetches issued, including the final empty one
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Number of records yielded so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    fn fetch_next_page(&mut self) -> ErrorLogResult<bool> {
        let page_index = self.next_page;
        let batch = self.log.fetch_page(page_index, self.page_size)?;
        self.pages_fetched += 1;

        let count = batch.len().to_string();
        let page = page_index.to_string();
        Logger::trace(
            Event::PageFetched.as_str(),
            &[("page_index", &page), ("records", &count)],
        );

        if batch.is_empty() {
            return Ok(false);
        }

        self.batch_page = page_index;
        self.batch = batch.into_iter();
        self.next_page += 1;
        Ok(true)
    }
}

impl<L: ErrorLog + ?Sized> Iterator for RecordStream<'_, L> {
    type Item = ErrorLogResult<PagedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(record) = self.batch.next() {
                self.records_read += 1;
                return Some(Ok(PagedRecord {
                    page_index: self.batch_page,
                    record,
                }));
            }

            match self.fetch_next_page() {
                Ok(true) => continue,
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Consumer-side page ceiling over a [`RecordStream`].
///
/// Yields records while their page index is below `max_pages` and never lets
/// the stream fetch page `max_pages` or later.
pub struct PageCeiling<'a, L: ErrorLog + ?Sized> {
    stream: RecordStream<'a, L>,
    max_pages: usize,
    reached: bool,
}

impl<'a, L: ErrorLog + ?Sized> PageCeiling<'a, L> {
    pub fn new(stream: RecordStream<'a, L>, max_pages: usize) -> Self {
        Self {
            stream,
            max_pages,
            reached: false,
        }
    }

    /// The wrapped stream
    pub fn stream(&self) -> &RecordStream<'a, L> {
        &self.stream
    }

    /// Whether the ceiling cut the stream short
    pub fn ceiling_reached(&self) -> bool {
        self.reached
    }
}

impl<L: ErrorLog + ?Sized> Iterator for PageCeiling<'_, L> {
    type Item = ErrorLogResult<PagedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reached {
            return None;
        }

        if let Some(page_index) = self.stream.pending_fetch() {
            if page_index >= self.max_pages {
                self.reached = true;
                return None;
            }
        }

        match self.stream.next() {
            Some(Ok(paged)) if paged.page_index >= self.max_pages => {
                self.reached = true;
                None
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::test_support::{record_on, ScriptedLog};

    #[test]
    fn test_empty_log_yields_nothing() {
        let log = ScriptedLog::with_records(vec![]);
        let mut stream = RecordStream::new(&log, 30);

        assert!(stream.next().is_none());
        assert_eq!(log.fetched_pages(), vec![0]);
    }

    #[test]
    fn test_records_tagged_with_page_index() {
        let records = (0..5).map(|i| record_on("2024-01-02", &i.to_string())).collect();
        let log = ScriptedLog::with_records(records);

        let pages: Vec<usize> = RecordStream::new(&log, 2)
            .map(|r| r.unwrap().page_index)
            .collect();

        assert_eq!(pages, vec![0, 0, 1, 1, 2]);
        // Final fetch of page 3 comes back empty
        assert_eq!(log.fetched_pages(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_ceiling_never_fetches_page_at_limit() {
        let records = (0..5).map(|i| record_on("2024-01-02", &i.to_string())).collect();
        let log = ScriptedLog::with_records(records);

        let mut bounded = RecordStream::new(&log, 1).with_page_ceiling(2);
        let ids: Vec<String> = bounded.by_ref().map(|r| r.unwrap().record.id).collect();

        assert_eq!(ids, vec!["0", "1"]);
        assert_eq!(log.fetched_pages(), vec![0, 1]);
        assert!(bounded.ceiling_reached());
        assert_eq!(bounded.stream().pages_fetched(), 2);
    }

    #[test]
    fn test_fetch_failure_is_yielded_once() {
        let records = (0..4).map(|i| record_on("2024-01-02", &i.to_string())).collect();
        let log = ScriptedLog::with_records(records).failing_at(1);

        let mut stream = RecordStream::new(&log, 2);
        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
        assert_eq!(stream.records_read(), 2);
    }
}
