//! # Multi sink: ordered fan-out to child sinks.
//!
//! Each event is dispatched to every child in list order, from the
//! caller's thread. `close()` closes all children in order; the first
//! failure is remembered and returned, but every child is still attempted.

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::sinks::{Sink, SinkRef};

/// Sink dispatching every event to an ordered list of children.
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use stepvisor::{CollectingSink, MultiSink, Sink};
///
/// let first = Arc::new(CollectingSink::new());
/// let second = Arc::new(CollectingSink::new());
/// let fanout = MultiSink::new(vec![first.clone(), second.clone()]);
/// fanout.close().unwrap();
/// ```
pub struct MultiSink {
    children: Vec<SinkRef>,
}

impl MultiSink {
    /// Creates a fan-out over `children`; dispatch follows list order.
    pub fn new(children: Vec<SinkRef>) -> Self {
        Self { children }
    }
}

impl Sink for MultiSink {
    fn log(&self, event: &LoggingEvent) {
        for child in &self.children {
            child.log(event);
        }
    }

    fn close(&self) -> Result<(), SinkError> {
        let mut first_failure = None;
        for child in &self.children {
            if let Err(error) = child.close() {
                first_failure.get_or_insert(error);
            }
        }
        match first_failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
