//! # File sink: one sanitized physical line per event.
//!
//! Two handle policies:
//! - **[`FileMode::Blocking`]** keeps the handle open until `close()`.
//! - **[`FileMode::Reopening`]** reopens, appends and closes per write, so
//!   external log rotation can move the file between events.
//!
//! Every write is flushed before returning; a sink wrapped by a
//! [`CrashSink`](crate::CrashSink) therefore has the line on disk when
//! `log` returns.
//!
//! ## Rules
//! - Lines are sanitized (`\r` removed, `\` and `\n` escaped) so each
//!   event occupies exactly one physical line.
//! - A line observed once is suppressed on repetition for the lifetime of
//!   the sink.
//! - Write failures go to standard error; `close()` failures propagate.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use dashmap::DashSet;
use parking_lot::Mutex;

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::sinks::format::{render_line, sanitize_line, LineStyle};
use crate::sinks::{SeverityFilter, Sink};

/// Handle policy of a [`FileSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Keep the handle open from construction until `close()`.
    Blocking,
    /// Reopen, append and close on every write.
    Reopening,
}

/// Sink appending one sanitized line per event to a file.
pub struct FileSink {
    path: PathBuf,
    mode: FileMode,
    filter: SeverityFilter,
    style: LineStyle,
    handle: Mutex<Option<File>>,
    observed: DashSet<String>,
    closed: AtomicBool,
}

impl FileSink {
    /// Creates a blocking-mode sink; the file is opened (and its parent
    /// directory created) immediately.
    pub fn blocking(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        Ok(Self::build(path, FileMode::Blocking, Some(file)))
    }

    /// Creates a reopen-per-write sink; the path is opened once up front
    /// so an unwritable destination fails at construction.
    pub fn reopening(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        open_append(&path)?;
        Ok(Self::build(path, FileMode::Reopening, None))
    }

    fn build(path: PathBuf, mode: FileMode, handle: Option<File>) -> Self {
        Self {
            path,
            mode,
            filter: SeverityFilter::default(),
            style: LineStyle::default(),
            handle: Mutex::new(handle),
            observed: DashSet::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Replaces the severity filter.
    pub fn with_filter(mut self, filter: SeverityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Indents low-severity lines by stack depth.
    pub fn with_step_indentation(mut self) -> Self {
        self.style.step_indentation = true;
        self
    }

    /// Destination path of this sink.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        match self.mode {
            FileMode::Blocking => {
                let mut guard = self.handle.lock();
                if let Some(file) = guard.as_mut() {
                    writeln!(file, "{line}")?;
                    file.flush()?;
                }
                Ok(())
            }
            FileMode::Reopening => {
                let mut file = open_append(&self.path)?;
                writeln!(file, "{line}")?;
                file.flush()?;
                Ok(())
            }
        }
    }
}

impl Sink for FileSink {
    fn log(&self, event: &LoggingEvent) {
        if self.closed.load(AtomicOrdering::Acquire) || !self.filter.accepts(event.severity) {
            return;
        }
        let line = sanitize_line(&render_line(event, self.style));
        if !self.observed.insert(line.clone()) {
            return;
        }
        if let Err(error) = self.write_line(&line) {
            eprintln!(
                "stepvisor: file sink failed to write {}: {error}",
                self.path.display()
            );
        }
    }

    fn close(&self) -> Result<(), SinkError> {
        if self.closed.swap(true, AtomicOrdering::AcqRel) {
            return Ok(());
        }
        if let Some(mut file) = self.handle.lock().take() {
            file.flush()?;
        }
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File, SinkError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}
