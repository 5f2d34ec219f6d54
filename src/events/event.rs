//! # The immutable record delivered to sinks.
//!
//! A [`LoggingEvent`] is composed once per `log` call from the
//! supervisor's context plus the user's message and arguments, then passed
//! through the sink pipeline by reference. Sinks that need ownership
//! (queues, rewrites) clone it.
//!
//! ## Rules
//! - The effectuation stack is a by-value snapshot, never aliased with the
//!   live supervisor stack.
//! - `time` is non-decreasing within one process (see
//!   [`monotonic_millis`](crate::util::monotonic_millis)).
//! - JSON encoding carries all three language slots of each localized
//!   text (`null` when absent) and round-trips to an equal event.

use serde::{Deserialize, Serialize};

use crate::events::effectuation::Effectuation;
use crate::messages::LocalizedText;
use crate::severity::Severity;

/// One logging event: severity, localized texts, and the execution context
/// it was emitted under.
///
/// ## Example
/// ```
/// use stepvisor::{LoggingEvent, LocalizedText, Severity};
///
/// let event = LoggingEvent::new(Severity::Info, "app", LocalizedText::english("ready"));
/// assert_eq!(event.execution_level(), 0);
/// let json = serde_json::to_string(&event).unwrap();
/// let back: LoggingEvent = serde_json::from_str(&json).unwrap();
/// assert_eq!(back, event);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingEvent {
    /// Stable id of the message this event was logged from, if any.
    #[serde(rename = "messageID")]
    pub message_id: Option<String>,
    /// Severity as delivered to this sink (appease may have rewritten it).
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Process id of the emitting process, if configured.
    #[serde(rename = "processID")]
    pub process_id: Option<u32>,
    /// Application name of the emitting supervisor.
    #[serde(rename = "applicationName")]
    pub application_name: String,
    /// Localized fact, placeholders already substituted.
    pub fact: LocalizedText,
    /// Localized solution, placeholders already substituted.
    pub solution: Option<LocalizedText>,
    /// Description of the work item being processed, if configured.
    #[serde(rename = "itemInfo")]
    pub item_info: Option<String>,
    /// Position within the work item (line, record, offset), if supplied.
    #[serde(rename = "itemPositionInfo")]
    pub item_position_info: Option<String>,
    /// Snapshot of the effectuation stack at emit time, outermost first.
    #[serde(rename = "effectuationIDStack")]
    pub effectuation_stack: Vec<Effectuation>,
    /// Milliseconds since the Unix epoch, non-decreasing per process.
    pub time: u64,
}

impl LoggingEvent {
    /// Creates a bare event with the given severity, application name and
    /// fact, stamped with the current monotonic time. The remaining fields
    /// are filled by the supervisor when it composes the event.
    pub fn new(
        severity: Severity,
        application_name: impl Into<String>,
        fact: LocalizedText,
    ) -> Self {
        Self {
            message_id: None,
            severity,
            process_id: None,
            application_name: application_name.into(),
            fact,
            solution: None,
            item_info: None,
            item_position_info: None,
            effectuation_stack: Vec::new(),
            time: crate::util::monotonic_millis(),
        }
    }

    /// Nesting depth at emit time; always the effectuation stack length.
    pub fn execution_level(&self) -> usize {
        self.effectuation_stack.len()
    }
}
