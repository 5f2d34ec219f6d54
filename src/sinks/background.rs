//! # Background sink: event processing on a dedicated worker thread.
//!
//! `log` enqueues a clone of the event and returns immediately; a single
//! worker thread drains the queue, applies the severity filter and runs a
//! user-provided action per event.
//!
//! ## Architecture
//! ```text
//! log(event) ──► [queue] ──► worker thread ──► action(event)
//!                                    └───────► on_close()   (at close)
//! ```
//!
//! ## Rules
//! - `close()` drains everything already enqueued, runs the close action
//!   and joins the worker before returning.
//! - After `close()`, further `log` calls are dropped silently.
//! - Action failures are written to standard error; only the close
//!   action's failure propagates, out of `close()`.
//! - Ordering holds between this sink's own emissions; it says nothing
//!   about concurrent direct writers to the same descriptor.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::sinks::{SeverityFilter, Sink, SinkRef};

/// Sink that processes events on its own worker thread.
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use stepvisor::{BackgroundSink, CollectingSink, SeverityFilter, Sink};
///
/// let inner = Arc::new(CollectingSink::new());
/// let sink = BackgroundSink::wrapping(SeverityFilter::default(), inner.clone()).unwrap();
/// // ... log events ...
/// sink.close().unwrap();
/// assert!(inner.events().is_empty());
/// ```
pub struct BackgroundSink {
    sender: Mutex<Option<mpsc::Sender<LoggingEvent>>>,
    worker: Mutex<Option<JoinHandle<Result<(), SinkError>>>>,
    processed: Arc<AtomicU64>,
}

impl BackgroundSink {
    /// Spawns the worker thread. `action` runs once per accepted event;
    /// `on_close` runs after the queue has drained at close time.
    pub fn new(
        filter: SeverityFilter,
        mut action: impl FnMut(&LoggingEvent) -> Result<(), SinkError> + Send + 'static,
        on_close: impl FnOnce() -> Result<(), SinkError> + Send + 'static,
    ) -> Result<Self, SinkError> {
        let (sender, receiver) = mpsc::channel::<LoggingEvent>();
        let processed = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&processed);
        let worker = thread::Builder::new()
            .name("stepvisor-background-sink".to_string())
            .spawn(move || {
                while let Ok(event) = receiver.recv() {
                    if !filter.accepts(event.severity) {
                        continue;
                    }
                    if let Err(error) = action(&event) {
                        eprintln!("stepvisor: background sink failed to process event: {error}");
                    }
                    counter.fetch_add(1, AtomicOrdering::Relaxed);
                }
                on_close()
            })?;
        Ok(Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            processed,
        })
    }

    /// Spawns a worker that forwards each accepted event to `inner` and
    /// closes `inner` when this sink closes.
    pub fn wrapping(filter: SeverityFilter, inner: SinkRef) -> Result<Self, SinkError> {
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

    /// Number of events the worker has finished processing.
    pub fn processed(&self) -> u64 {
        self.processed.load(AtomicOrdering::Relaxed)
    }
}

impl Sink for BackgroundSink {
    fn log(&self, event: &LoggingEvent) {
        let guard = self.sender.lock();
        if let Some(sender) = guard.as_ref() {
            let _ = sender.send(event.clone());
        }
    }

    fn close(&self) -> Result<(), SinkError> {
        // Dropping the sender lets the worker drain the queue and exit.
        let sender = self.sender.lock().take();
        drop(sender);
        let worker = self.worker.lock().take();
        match worker {
            Some(handle) => handle.join().map_err(|_| SinkError::WorkerPanicked)?,
            None => Ok(()),
        }
    }
}
