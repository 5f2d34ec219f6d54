//! # Immutable message definitions and their holder trait.

use std::collections::BTreeMap;

use crate::messages::text::LocalizedText;
use crate::severity::Severity;

/// An immutable message definition: what can be logged, at which severity,
/// with which localized fact and optional localized solution.
///
/// Messages are defined once (typically as part of a step's data) and
/// logged many times with varying positional arguments.
///
/// ## Example
/// ```
/// use stepvisor::{Language, LocalizedText, Message, Severity};
///
/// let msg = Message::new(
///     Severity::Warning,
///     LocalizedText::english("file $1 not found").with(Language::De, "Datei $1 nicht gefunden"),
/// )
/// .with_id("fs:missing")
/// .with_solution(LocalizedText::english("check the search path"));
///
/// assert_eq!(msg.id(), Some("fs:missing"));
/// assert_eq!(msg.severity(), Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: Option<String>,
    severity: Severity,
    fact: LocalizedText,
    solution: Option<LocalizedText>,
}

impl Message {
    /// Creates a message with the given severity and fact.
    pub fn new(severity: Severity, fact: LocalizedText) -> Self {
        Self {
            id: None,
            severity,
            fact,
            solution: None,
        }
    }

    /// Attaches a stable message id, consuming and returning `self`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attaches a localized solution, consuming and returning `self`.
    pub fn with_solution(mut self, solution: LocalizedText) -> Self {
        self.solution = Some(solution);
        self
    }

    /// Stable id of this message, if one was assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Severity this message is logged at (before any appease rewriting).
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Localized fact text.
    pub fn fact(&self) -> &LocalizedText {
        &self.fact
    }

    /// Localized solution text, if any.
    pub fn solution(&self) -> Option<&LocalizedText> {
        self.solution.as_ref()
    }
}

/// Registry of the messages a step-data value can emit.
///
/// Each step-data value owns a dictionary `id → Message`, built at
/// construction time (hand-coded or generated). A
/// [`StepDataCollector`](crate::StepDataCollector) consumes these
/// dictionaries directly.
pub trait MessagesHolder {
    /// Returns this value's message registry, keyed by message id.
    fn messages(&self) -> BTreeMap<String, Message>;
}
