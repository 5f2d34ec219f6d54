//! # Prefix sink: decorates texts and forwards.
//!
//! Prepends a fixed prefix to every present language slot of the fact
//! (and the solution, when there is one), then hands the rewritten event
//! to the wrapped sink. Wrapping a prefix sink in another prefix sink
//! concatenates the prefixes, outermost first.

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::sinks::{Sink, SinkRef};

/// Sink prepending a prefix to event texts before forwarding.
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use stepvisor::{CollectingSink, Language, LocalizedText, LoggingEvent, PrefixSink, Severity, Sink};
///
/// let inner = Arc::new(CollectingSink::new());
/// let prefixed = PrefixSink::new("worker 3: ", inner.clone());
/// prefixed.log(&LoggingEvent::new(Severity::Info, "app", LocalizedText::english("ready")));
/// assert_eq!(inner.events()[0].fact.get(Language::En), Some("worker 3: ready"));
/// ```
pub struct PrefixSink {
    prefix: String,
    inner: SinkRef,
}

impl PrefixSink {
    /// Wraps `inner`, prefixing every outgoing text with `prefix`.
    pub fn new(prefix: impl Into<String>, inner: SinkRef) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }
}

impl Sink for PrefixSink {
    fn log(&self, event: &LoggingEvent) {
        let mut decorated = event.clone();
        decorated.fact = decorated.fact.prefixed(&self.prefix);
        decorated.solution = decorated
            .solution
            .as_ref()
            .map(|solution| solution.prefixed(&self.prefix));
        self.inner.log(&decorated);
    }

    fn close(&self) -> Result<(), SinkError> {
        self.inner.close()
    }
}
