//! Shared fixtures for the test suite.

use std::sync::Arc;

use crate::{CollectingSink, Config, LocalizedText, Message, Severity, StepId, Supervisor};

/// Supervisor logging into a fresh collecting sink.
pub fn collecting_supervisor() -> (Supervisor, Arc<CollectingSink>) {
    collecting_supervisor_with(Config::new("app"))
}

/// Supervisor with an explicit configuration and a fresh collecting sink.
pub fn collecting_supervisor_with(config: Config) -> (Supervisor, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let supervisor = Supervisor::new(config, sink.clone());
    (supervisor, sink)
}

/// Step id on the shared test file `f1`.
pub fn step(signature: &str) -> StepId {
    StepId::new("f1", signature)
}

/// English-only message at the given severity.
pub fn message(severity: Severity, fact: &str) -> Message {
    Message::new(severity, LocalizedText::english(fact))
}

/// Asserts the sink's progress facts start with `expected`, in order.
///
/// Prefix comparison keeps the step-close assertions independent of the
/// measured durations.
pub fn assert_progress(sink: &CollectingSink, expected: &[&str]) {
    let lines = sink.english_facts_at(Severity::Progress);
    assert_eq!(
        lines.len(),
        expected.len(),
        "unexpected progress lines: {lines:#?}"
    );
    for (line, prefix) in lines.iter().zip(expected) {
        assert!(
            line.starts_with(prefix),
            "expected {line:?} to start with {prefix:?}"
        );
    }
}
