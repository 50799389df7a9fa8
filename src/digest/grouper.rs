//! Day grouping
//!
//! [`DayGrouper`] folds a newest-first record stream into one
//! [`DigestGroup`] per UTC calendar day.
//!
//! A new group starts only when a record's day is strictly earlier than the
//! open group's day. A record on the same day, or on a later day, joins the
//! open group. The store is trusted to deliver days in non-increasing order;
//! a source that breaks that ordering gets merged groups rather than an
//! error.

use std::mem;

use chrono::{DateTime, NaiveDate, Utc};

use super::render::{LIST_END, LIST_START};
use super::stream::PagedRecord;
use crate::error_log::{ErrorLogResult, ErrorRecord};
use crate::observability::{Event, Logger};

/// Title of the digest for `day`, e.g.
/// `Digest for 2024-01-02 (Tuesday, January 2, 2024)`.
pub fn digest_title(day: NaiveDate) -> String {
    format!(
        "Digest for {} ({})",
        day.format("%Y-%m-%d"),
        day.format("%A, %B %-d, %Y")
    )
}

/// The errors of one calendar day, rendered as a single feed item.
///
/// Only emitted sealed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestGroup {
    /// UTC calendar day shared by every record in the group
    pub day: NaiveDate,
    pub title: String,
    /// Time of the first record seen for the day
    pub published: DateTime<Utc>,
    /// `<ul>` list of rendered records
    pub body: String,
    pub record_count: usize,
}

struct OpenGroup {
    day: NaiveDate,
    published: DateTime<Utc>,
    body: String,
    count: usize,
}

impl OpenGroup {
    fn open(record: &ErrorRecord) -> Self {
        let published = record.utc_time();
        let mut body = String::with_capacity(1024);
        body.push_str(LIST_START);
        Self {
            day: published.date_naive(),
            published,
            body,
            count: 0,
        }
    }

    fn append(&mut self, fragment: &str) {
        self.body.push_str(fragment);
        self.count += 1;
    }

    fn seal(mut self) -> Option<DigestGroup> {
        if self.count == 0 {
            return None;
        }
        self.body.push_str(LIST_END);
        Some(DigestGroup {
            day: self.day,
            title: digest_title(self.day),
            published: self.published,
            body: self.body,
            record_count: self.count,
        })
    }
}

enum GroupState {
    NoGroupOpen,
    GroupOpen(OpenGroup),
}

/// Lazy per-day grouping over a paged record stream.
///
/// `render` produces the markup fragment for one record. Groups are yielded
/// as soon as the next day starts, so a caller taking only the first `n`
/// groups stops the underlying page fetches as well.
pub struct DayGrouper<I, F> {
    source: I,
    render: F,
    state: GroupState,
    groups_emitted: usize,
    finished: bool,
}

impl<I, F> DayGrouper<I, F>
where
    I: Iterator<Item = ErrorLogResult<PagedRecord>>,
    F: FnMut(&ErrorRecord) -> String,
{
    pub fn new(source: I, render: F) -> Self {
        Self {
            source,
            render,
            state: GroupState::NoGroupOpen,
            groups_emitted: 0,
            finished: false,
        }
    }

    /// The record source being grouped
    pub fn source(&self) -> &I {
        &self.source
    }

    /// Groups yielded so far
    pub fn groups_emitted(&self) -> usize {
        self.groups_emitted
    }

    fn take_open(&mut self) -> Option<OpenGroup> {
        match mem::replace(&mut self.state, GroupState::NoGroupOpen) {
            GroupState::GroupOpen(group) => Some(group),
            GroupState::NoGroupOpen => None,
        }
    }

    fn emit(&mut self, group: DigestGroup) -> Option<ErrorLogResult<DigestGroup>> {
        self.groups_emitted += 1;
        let day = group.day.to_string();
        let count = group.record_count.to_string();
        Logger::trace(
            Event::GroupSealed.as_str(),
            &[("day", &day), ("records", &count)],
        );
        Some(Ok(group))
    }
}

impl<I, F> Iterator for DayGrouper<I, F>
where
    I: Iterator<Item = ErrorLogResult<PagedRecord>>,
    F: FnMut(&ErrorRecord) -> String,
{
    type Item = ErrorLogResult<DigestGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let record = match self.source.next() {
                Some(Ok(paged)) => paged.record,
                Some(Err(e)) => {
                    self.finished = true;
                    self.state = GroupState::NoGroupOpen;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    return match self.take_open().and_then(OpenGroup::seal) {
                        Some(group) => self.emit(group),
                        None => None,
                    };
                }
            };

            let starts_new_day = match &self.state {
                GroupState::NoGroupOpen => true,
                GroupState::GroupOpen(open) => record.utc_day() < open.day,
            };

            let sealed = if starts_new_day {
                let previous = self.take_open();
                self.state = GroupState::GroupOpen(OpenGroup::open(&record));
                previous.and_then(OpenGroup::seal)
            } else {
                None
            };

            let fragment = (self.render)(&record);
            if let GroupState::GroupOpen(open) = &mut self.state {
                open.append(&fragment);
            }

            if let Some(group) = sealed {
                return self.emit(group);
            }
        }
    }
}
