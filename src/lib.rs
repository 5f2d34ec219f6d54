//! # stepvisor
//!
//! **Stepvisor** is a workflow execution and structured-logging framework.
//!
//! It supervises the execution of a tree of user-defined *steps* for a
//! single *work item*, deduplicates step execution by identity, and emits
//! hierarchically tagged logging events through a composable sink
//! pipeline, including a synchronous crash sink.
//!
//! ## Features
//!
//! | Area              | Description                                                        | Key types / traits                       |
//! |-------------------|--------------------------------------------------------------------|------------------------------------------|
//! | **Supervision**   | Step dedup, force/optional/dispensable/appease/disremember scopes. | [`Supervisor`], [`Config`]               |
//! | **Messages**      | Localized message catalogs with positional placeholders.           | [`Message`], [`LocalizedText`], [`MessagesHolder`] |
//! | **Events**        | Immutable events carrying the effectuation stack snapshot.         | [`LoggingEvent`], [`Effectuation`], [`StepId`] |
//! | **Sinks**         | Print, file, background, crash, fan-out, prefix, HTTP, in-memory.  | [`Sink`], [`MultiSink`], [`CrashSink`]   |
//! | **Status**        | Monotonic worst-severity summary shared across parallel siblings.  | [`WorstSeverity`], [`Severity`]          |
//! | **Async**         | The same operators with suspending bodies.                         | [`BoxStepFuture`], [`async_body`]        |
//!
//! ```
//! use std::sync::Arc;
//! use stepvisor::{step_id, CollectingSink, Config, LocalizedText, Message, Severity, Supervisor};
//!
//! let sink = Arc::new(CollectingSink::new());
//! let mut sup = Supervisor::new(Config::new("importer"), sink.clone());
//!
//! let missing = Message::new(Severity::Warning, LocalizedText::english("input $1 is missing"));
//!
//! sup.effectuate(step_id!("import()"), |sup| {
//!     sup.effectuate(step_id!("parse()"), |sup| {
//!         sup.log(&missing, &["header"]);
//!     });
//! });
//!
//! assert_eq!(sup.worst_severity(), Severity::Warning);
//! sup.close_sinks().unwrap();
//! ```
//!
//! ---

pub mod config;
pub mod core;
pub mod error;
pub mod events;
mod macros;
pub mod messages;
pub mod severity;
pub mod sinks;
pub mod util;

// ---- Public re-exports ----

pub use crate::config::Config;
pub use crate::core::{async_body, BoxStepFuture, PauseGate, StepHook, Supervisor, WorstSeverity};
pub use crate::error::SinkError;
pub use crate::events::{
    Effectuation, LoggingEvent, ParseEffectuationError, ParseStepIdError, StepId,
};
pub use crate::messages::{
    substitute_placeholders, Language, LocalizedText, Message, MessagesHolder, StepDataCollector,
};
pub use crate::severity::{ParseSeverityError, Severity};
pub use crate::sinks::{
    render_line, sanitize_line, BackgroundSink, CollectingSink, CrashSink, FileMode, FileSink,
    HttpSink, LineStyle, MultiSink, PrefixSink, PrintSink, SeverityFilter, Sink, SinkRef,
};

#[cfg(test)]
mod tests;
