//! Output feed written by the task runner.
//!
//! The runner appends one JSON object per line to a feed file. Each line is
//! either a captured output record or one of the console signals:
//!
//! ```text
//! {"type":"output","id":"…","task_id":"…","project_id":"…","content":"Listening on :3000"}
//! {"type":"scroll_latest"}
//! {"type":"select_index","index":-1}
//! {"type":"viewing_task","task_id":"…"}
//! ```
//!
//! [`FeedReader`] tails the file between render passes. A line is only parsed
//! once its newline has been written.

use crate::error::{Result, TaskdeckError};
use crate::events::{ConsoleEvent, SelectionSignal};
use crate::model::OutputRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEntry {
    Output(OutputRecord),
    ScrollLatest,
    SelectIndex { index: i64 },
    ViewingTask { task_id: Uuid },
}

impl FeedEntry {
    /// Parse one feed line. `line` is the 1-based line number used in errors.
    pub fn parse(text: &str, line: usize) -> Result<FeedEntry> {
        serde_json::from_str(text).map_err(|e| TaskdeckError::Feed {
            line,
            reason: e.to_string(),
        })
    }

    /// The console signal for this entry. Output records go to the store instead.
    pub fn into_signal(self) -> std::result::Result<ConsoleEvent, OutputRecord> {
        match self {
            FeedEntry::Output(record) => Err(record),
            FeedEntry::ScrollLatest => Ok(ConsoleEvent::NewOutput(None)),
            FeedEntry::SelectIndex { index } => Ok(ConsoleEvent::Selection(
                SelectionSignal::TaskIndexChanged(index),
            )),
            FeedEntry::ViewingTask { task_id } => Ok(ConsoleEvent::Selection(
                SelectionSignal::ViewingTaskChanged(task_id),
            )),
        }
    }
}

/// Incremental reader of a feed file.
#[derive(Debug)]
pub struct FeedReader {
    path: PathBuf,
    offset: u64,
    /// Bytes after the last newline, kept until the line is complete
    partial: Vec<u8>,
    lines_read: usize,
}

impl FeedReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            offset: 0,
            partial: Vec::new(),
            lines_read: 0,
        }
    }

    /// Entries completed since the last poll.
    ///
    /// A missing file yields nothing. A file shorter than what was already read
    /// is treated as truncated and read again from the start. Malformed lines
    /// are logged and skipped.
    pub fn poll(&mut self) -> Result<Vec<FeedEntry>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let len = file.metadata()?.len();
        if len < self.offset {
            tracing::info!(path = %self.path.display(), "feed truncated, reading from start");
            self.offset = 0;
            self.partial.clear();
            self.lines_read = 0;
        }
        if len == self.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.offset))?;
        let read = file.read_to_end(&mut self.partial)?;
        self.offset += read as u64;

        let mut entries = Vec::new();
        while let Some(newline) = self.partial.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.partial.drain(..=newline).collect();
            self.lines_read += 1;
            let line = String::from_utf8_lossy(&line);
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            match FeedEntry::parse(text, self.lines_read) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "skipping feed line"),
            }
        }

        Ok(entries)
    }
}
