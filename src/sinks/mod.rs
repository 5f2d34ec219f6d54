//! # The sink pipeline: where logging events go.
//!
//! A [`Sink`] accepts events with `log` (fire-and-forget unless the sink
//! is synchronous by contract) and releases its resources with `close`.
//! Sinks compose: a [`MultiSink`] fans out to children, a [`PrefixSink`]
//! decorates and forwards, a [`BackgroundSink`] moves processing onto a
//! worker thread, a [`CrashSink`] processes synchronously so an event is
//! on disk before `log` returns.
//!
//! ## Architecture
//! ```text
//! Supervisor::log()
//!     │
//!     ├──► CrashSink ──► file (synchronous, flushed)
//!     │
//!     └──► MultiSink
//!           ├──► PrintSink            (stdout / stderr)
//!           ├──► PrefixSink ──► FileSink
//!           └──► BackgroundSink ──► worker ──► HttpSink
//! ```
//!
//! ## Rules
//! - Events delivered before `close()` returns are fully processed.
//! - `close()` is idempotent; a second call is a no-op returning `Ok`.
//! - I/O failures while logging go to standard error, never to the caller.
//! - `close()` failures propagate to the caller.

mod background;
mod collect;
mod crash;
mod file;
mod format;
mod http;
mod multi;
mod prefix;
mod print;

use std::sync::Arc;

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::severity::Severity;

pub use background::BackgroundSink;
pub use collect::CollectingSink;
pub use crash::CrashSink;
pub use file::{FileMode, FileSink};
pub use format::{render_line, sanitize_line, LineStyle};
pub use http::HttpSink;
pub use multi::MultiSink;
pub use prefix::PrefixSink;
pub use print::PrintSink;

/// Shared handle to a sink object.
///
/// Sinks are shared across supervisors (and their parallel siblings), so
/// the pipeline is built from `Arc`s.
pub type SinkRef = Arc<dyn Sink>;

/// Destination for logging events.
///
/// ## Rules
/// - `log` must not panic and must not propagate I/O errors; background
///   failures are reported on standard error.
/// - Everything delivered before `close()` returns must be fully
///   processed by the time `close()` returns.
/// - `close` is idempotent.
pub trait Sink: Send + Sync {
    /// Delivers one event.
    fn log(&self, event: &LoggingEvent);

    /// Flushes and releases resources. Idempotent.
    fn close(&self) -> Result<(), SinkError>;
}

/// Severity filter shared by the filtering sinks.
///
/// `Progress` is opt-in and independent of the numeric threshold: a
/// filter accepts an event iff
/// `severity == Progress ? log_progress : severity >= min_severity`.
#[derive(Debug, Clone, Copy)]
pub struct SeverityFilter {
    /// Minimum severity accepted for non-progress events.
    pub min_severity: Severity,
    /// Whether progress events are accepted at all.
    pub log_progress: bool,
}

impl SeverityFilter {
    /// Creates a filter with the given threshold and progress switch.
    pub fn new(min_severity: Severity, log_progress: bool) -> Self {
        Self {
            min_severity,
            log_progress,
        }
    }

    /// Whether an event of `severity` passes this filter.
    pub fn accepts(&self, severity: Severity) -> bool {
        if severity == Severity::Progress {
            self.log_progress
        } else {
            severity >= self.min_severity
        }
    }
}

impl Default for SeverityFilter {
    /// Accepts everything, progress included.
    fn default() -> Self {
        Self {
            min_severity: Severity::Debug,
            log_progress: true,
        }
    }
}
