//! JSON-lines file error log
//!
//! Each line of the file is one JSON-encoded [`ErrorRecord`]. Records are
//! appended, so the file is oldest-first; pages are served from the end of
//! the file to keep the newest-first contract.
//!
//! Reads go through an index of line offsets. Only the bytes appended
//! since the previous fetch are scanned, and a page reads just its own lines.
//! A final line without a trailing newline is an append still in progress
//! (possibly from another process) and stays invisible until it completes.
//!
//! A missing file is an empty log. A complete line that fails to decode is
//! reported as corruption rather than skipped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::errors::{ErrorLogError, ErrorLogResult};
use super::record::ErrorRecord;
use super::{page_bounds, ErrorLog};

/// Location of one complete, non-blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineSpan {
    /// 1-based line number in the file
    number: usize,
    offset: u64,
    /// Length without the line terminator
    len: usize,
}

/// Offsets of complete lines, oldest first
#[derive(Debug, Default)]
struct LineIndex {
    spans: Vec<LineSpan>,
    /// Bytes covered by the index; always just past a `\n`
    indexed_len: u64,
    /// Lines seen so far, blank ones included
    lines_seen: usize,
}

impl LineIndex {
    fn reset(&mut self) {
        *self = LineIndex::default();
    }

    /// Index the complete lines appended since the last refresh.
    fn refresh(&mut self, file: &mut File) -> io::Result<()> {
        let file_len = file.metadata()?.len();
        if file_len < self.indexed_len {
            // Truncated or replaced; start over
            self.reset();
        }
        if file_len == self.indexed_len {
            return Ok(());
        }

        file.seek(SeekFrom::Start(self.indexed_len))?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader.read_until(b'\n', &mut line)?;
            if read == 0 || line.last() != Some(&b'\n') {
                // EOF, or a torn last line
                break;
            }

            self.lines_seen += 1;
            let content = &line[..line.len() - 1];
            if !content.iter().all(u8::is_ascii_whitespace) {
                self.spans.push(LineSpan {
                    number: self.lines_seen,
                    offset: self.indexed_len,
                    len: content.len(),
                });
            }
            self.indexed_len += read as u64;
        }
        Ok(())
    }

    /// Span at position `i` counting from the newest line.
    fn newest(&self, i: usize) -> LineSpan {
        self.spans[self.spans.len() - 1 - i]
    }
}

/// File-backed error log
#[derive(Debug)]
pub struct FileErrorLog {
    application_name: String,
    path: PathBuf,
    /// Serializes appends from concurrent writers in this process
    append_lock: Mutex<()>,
    index: Mutex<LineIndex>,
}

impl FileErrorLog {
    /// Open a log at `path`. The file is created on first append.
    pub fn open(application_name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            application_name: application_name.into(),
            path: path.as_ref().to_path_buf(),
            append_lock: Mutex::new(()),
            index: Mutex::new(LineIndex::default()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the refreshed index and the open file.
    ///
    /// A missing file is handed over as an empty index.
    fn with_index<T>(
        &self,
        f: impl FnOnce(&LineIndex, Option<&mut File>) -> ErrorLogResult<T>,
    ) -> ErrorLogResult<T> {
        let mut index = self
            .index
            .lock()
            .map_err(|_| ErrorLogError::Unavailable("line index lock poisoned".to_string()))?;

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                index.reset();
                return f(&*index, None);
            }
            Err(e) => return Err(ErrorLogError::Io(e)),
        };

        index.refresh(&mut file)?;
        f(&*index, Some(&mut file))
    }

    fn read_record(file: &mut File, span: LineSpan) -> ErrorLogResult<ErrorRecord> {
        let mut bytes = vec![0u8; span.len];
        file.seek(SeekFrom::Start(span.offset))?;
        file.read_exact(&mut bytes)?;

        let line = String::from_utf8(bytes).map_err(|e| ErrorLogError::Corrupt {
            line: span.number,
            reason: e.to_string(),
        })?;
        Self::decode(span.number, &line)
    }

    fn decode(line_number: usize, line: &str) -> ErrorLogResult<ErrorRecord> {
        serde_json::from_str(line).map_err(|e| ErrorLogError::Corrupt {
            line: line_number,
            reason: e.to_string(),
        })
    }
}

impl ErrorLog for FileErrorLog {
    fn application_name(&self) -> &str {
        &self.application_name
    }

    fn fetch_page(&self, page_index: usize, page_size: usize) -> ErrorLogResult<Vec<ErrorRecord>> {
        self.with_index(|index, file| {
            let Some(file) = file else {
                return Ok(Vec::new());
            };
            page_bounds(index.spans.len(), page_index, page_size)
                .map(|i| Self::read_record(file, index.newest(i)))
                .collect()
        })
    }

    fn get(&self, id: &str) -> ErrorLogResult<Option<ErrorRecord>> {
        self.with_index(|index, file| {
            let Some(file) = file else {
                return Ok(None);
            };
            for i in 0..index.spans.len() {
                let record = Self::read_record(file, index.newest(i))?;
                if record.id == id {
                    return Ok(Some(record));
                }
            }
            Ok(None)
        })
    }

    fn log(&self, record: ErrorRecord) -> ErrorLogResult<()> {
        let mut line =
            serde_json::to_string(&record).map_err(|e| ErrorLogError::Encode(e.to_string()))?;
        line.push('\n');

        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| ErrorLogError::Unavailable("append lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        // One write per record keeps lines whole
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
