//! # Print sink: human-readable lines on the standard streams.
//!
//! Events render through [`render_line`](crate::sinks::render_line).
//! `Error` and above go to standard error so they survive stdout
//! redirection; `errors_to_standard` routes everything to stdout instead.
//! Lines from a single thread appear in submission order.

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::severity::Severity;
use crate::sinks::format::{render_line, LineStyle};
use crate::sinks::{SeverityFilter, Sink};

/// Sink writing one human-readable line per event to stdout/stderr.
///
/// ## Example
/// ```
/// use stepvisor::{PrintSink, Severity, SeverityFilter};
///
/// let sink = PrintSink::new()
///     .with_filter(SeverityFilter::new(Severity::Info, true))
///     .with_step_indentation();
/// ```
#[derive(Debug, Default)]
pub struct PrintSink {
    filter: SeverityFilter,
    errors_to_standard: bool,
    style: LineStyle,
}

impl PrintSink {
    /// Creates a print sink that accepts every severity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the severity filter.
    pub fn with_filter(mut self, filter: SeverityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Routes `Error` and above to stdout instead of stderr.
    pub fn errors_to_standard(mut self) -> Self {
        self.errors_to_standard = true;
        self
    }

    /// Indents low-severity lines by stack depth.
    pub fn with_step_indentation(mut self) -> Self {
        self.style.step_indentation = true;
        self
    }
}

impl Sink for PrintSink {
    fn log(&self, event: &LoggingEvent) {
        if !self.filter.accepts(event.severity) {
            return;
        }
        let line = render_line(event, self.style);
        if event.severity >= Severity::Error && !self.errors_to_standard {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn close(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
