//! # Message catalog: localized texts, messages, and their registries.
//!
//! A [`Message`] pairs a severity with a localized fact (and optionally a
//! localized solution). Step-data values expose the messages they can emit
//! through [`MessagesHolder`]; a [`StepDataCollector`] consumes those
//! registries into a single catalog.
//!
//! - **[`Language`]** — the closed language set with its stable order
//! - **[`LocalizedText`]** — per-language text with `$1..$N` placeholders
//! - **[`Message`]** — immutable (id, severity, fact, solution) record
//! - **[`MessagesHolder`]** — registry trait implemented by step data
//! - **[`StepDataCollector`]** — catalog aggregation and serialization

mod collector;
mod message;
mod text;

pub use collector::StepDataCollector;
pub use message::{Message, MessagesHolder};
pub use text::{substitute_placeholders, Language, LocalizedText};
