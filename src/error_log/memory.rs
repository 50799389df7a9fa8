//! In-memory error log
//!
//! Keeps a bounded window of the most recent errors. Oldest entries are
//! dropped once the capacity is exceeded.

use std::collections::VecDeque;
use std::sync::RwLock;

use super::errors::{ErrorLogError, ErrorLogResult};
use super::record::ErrorRecord;
use super::{page_bounds, ErrorLog};

/// Default number of errors retained in memory
pub const DEFAULT_MEMORY_CAPACITY: usize = 15_000;

/// Bounded in-memory error log.
///
/// Records are stored newest-first, so page 0 is the most recent page.
#[derive(Debug)]
pub struct MemoryErrorLog {
    application_name: String,
    capacity: usize,
    entries: RwLock<VecDeque<ErrorRecord>>,
}

impl MemoryErrorLog {
    /// Create an empty log with the default capacity.
    pub fn new(application_name: impl Into<String>) -> Self {
        Self::with_capacity(application_name, DEFAULT_MEMORY_CAPACITY)
    }

    /// Create an empty log retaining at most `capacity` records.
    pub fn with_capacity(application_name: impl Into<String>, capacity: usize) -> Self {
        Self {
            application_name: application_name.into(),
            capacity: capacity.max(1),
            entries: RwLock::new(VecDeque::new()),
        }
    }

    /// Number of retained records
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> ErrorLogError {
        ErrorLogError::Unavailable("memory log lock poisoned".to_string())
    }
}

impl ErrorLog for MemoryErrorLog {
    fn application_name(&self) -> &str {
        &self.application_name
    }

    fn fetch_page(&self, page_index: usize, page_size: usize) -> ErrorLogResult<Vec<ErrorRecord>> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        let range = page_bounds(entries.len(), page_index, page_size);
        Ok(entries.range(range).cloned().collect())
    }

    fn get(&self, id: &str) -> ErrorLogResult<Option<ErrorRecord>> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.iter().find(|r| r.id == id).cloned())
    }

    fn log(&self, record: ErrorRecord) -> ErrorLogResult<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.push_front(record);
        while entries.len() > self.capacity {
            entries.pop_back();
        }
        Ok(())
    }
}
