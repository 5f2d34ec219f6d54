//! # Crash sink: synchronous, flushed-before-return event processing.
//!
//! The single-threaded counterpart of
//! [`BackgroundSink`](crate::BackgroundSink): `log` runs the user action
//! inline and returns only after it has completed. An event submitted
//! immediately before a crash is therefore already on disk.
//!
//! A supervisor routes an event here *before* appease rewriting, so the
//! crash record always carries the original severity.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::sinks::{SeverityFilter, Sink, SinkRef};

type CrashAction = Box<dyn FnMut(&LoggingEvent) -> Result<(), SinkError> + Send>;
type CloseAction = Box<dyn FnOnce() -> Result<(), SinkError> + Send>;

/// Sink that processes each event synchronously under a lock.
///
/// ## Example
/// ```no_run
/// use std::sync::Arc;
/// use stepvisor::{CrashSink, FileSink, SeverityFilter};
///
/// let file = Arc::new(FileSink::blocking("crash.log").unwrap());
/// let crash = CrashSink::wrapping(SeverityFilter::default(), file);
/// ```
pub struct CrashSink {
    filter: SeverityFilter,
    action: Mutex<Option<CrashAction>>,
    on_close: Mutex<Option<CloseAction>>,
}

impl CrashSink {
    /// Creates a crash sink around a per-event action and a close action.
    /// The action must have flushed its output by the time it returns.
    pub fn new(
        filter: SeverityFilter,
        action: impl FnMut(&LoggingEvent) -> Result<(), SinkError> + Send + 'static,
        on_close: impl FnOnce() -> Result<(), SinkError> + Send + 'static,
    ) -> Self {
        Self {
            filter,
            action: Mutex::new(Some(Box::new(action))),
            on_close: Mutex::new(Some(Box::new(on_close))),
        }
    }

    /// Creates a crash sink forwarding synchronously to `inner`. Pair it
    /// with a [`FileSink`](crate::FileSink) in blocking mode: that sink
    /// flushes every write before returning.
    pub fn wrapping(filter: SeverityFilter, inner: SinkRef) -> Self {
        let close_target = Arc::clone(&inner);
        Self::new(
            filter,
            move |event| {
                inner.log(event);
                Ok(())
            },
            move || close_target.close(),
        )
    }
}

impl Sink for CrashSink {
    fn log(&self, event: &LoggingEvent) {
        if !self.filter.accepts(event.severity) {
            return;
        }
        let mut guard = self.action.lock();
        if let Some(action) = guard.as_mut() {
            if let Err(error) = action(event) {
                eprintln!("stepvisor: crash sink failed to process event: {error}");
            }
        }
    }

    fn close(&self) -> Result<(), SinkError> {
        drop(self.action.lock().take());
        let on_close = self.on_close.lock().take();
        match on_close {
            Some(action) => action(),
            None => Ok(()),
        }
    }
}
