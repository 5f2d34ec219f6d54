//! # Collecting sink: in-memory capture for tests and short-lived runs.

use parking_lot::Mutex;

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::messages::Language;
use crate::severity::Severity;
use crate::sinks::Sink;

/// Sink appending every event to an in-memory list behind a lock.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<LoggingEvent>>,
}

impl CollectingSink {
    /// Creates an empty collecting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event collected so far, in delivery order.
    pub fn events(&self) -> Vec<LoggingEvent> {
        self.events.lock().clone()
    }

    /// English facts of the collected events, in delivery order.
    pub fn english_facts(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|event| event.fact.get(Language::En).unwrap_or_default().to_string())
            .collect()
    }

    /// English facts of the collected events with the given severity.
    pub fn english_facts_at(&self, severity: Severity) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.severity == severity)
            .map(|event| event.fact.get(Language::En).unwrap_or_default().to_string())
            .collect()
    }

    /// Number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Sink for CollectingSink {
    fn log(&self, event: &LoggingEvent) {
        self.events.lock().push(event.clone());
    }

    fn close(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
