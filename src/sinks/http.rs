//! # HTTP sink: POSTs each event as JSON to a fixed URL.
//!
//! The event is serialized with its wire field names (see
//! [`LoggingEvent`]) and sent with `Content-Type: application/json`.
//! Transport failures and non-success responses go to standard error;
//! `close()` is a no-op.

use crate::error::SinkError;
use crate::events::LoggingEvent;
use crate::sinks::{SeverityFilter, Sink};

/// Sink POSTing serialized events over HTTP.
///
/// Uses a blocking client; do not drive it from inside an async runtime.
/// Wrap it in a [`BackgroundSink`](crate::BackgroundSink) instead, which
/// also keeps slow endpoints off the logging hot path.
pub struct HttpSink {
    client: reqwest::blocking::Client,
    url: String,
    filter: SeverityFilter,
}

impl HttpSink {
    /// Creates a sink posting to `url`, accepting every severity.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: url.into(),
            filter: SeverityFilter::default(),
        }
    }

    /// Replaces the severity filter.
    pub fn with_filter(mut self, filter: SeverityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Destination URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Sink for HttpSink {
    fn log(&self, event: &LoggingEvent) {
        if !self.filter.accepts(event.severity) {
            return;
        }
        match self.client.post(&self.url).json(event).send() {
            Ok(response) if !response.status().is_success() => {
                eprintln!(
                    "stepvisor: http sink got {} from {}",
                    response.status(),
                    self.url
                );
            }
            Ok(_) => {}
            Err(error) => {
                eprintln!("stepvisor: http sink failed to post to {}: {error}", self.url);
            }
        }
    }

    fn close(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
