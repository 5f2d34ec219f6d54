//! # Logging events and the effectuation frames they carry.
//!
//! Every `log` call on a supervisor composes a [`LoggingEvent`] from the
//! supervisor's current context. The event embeds a by-value snapshot of
//! the effectuation stack, the nested [`Effectuation`] frames (steps,
//! optional/dispensable parts, described parts) active at emit time, so a
//! log consumer can reconstruct the step tree from the events alone.
//!
//! - **[`StepId`]** — structural step identity, canonical form `signature@file`
//! - **[`Effectuation`]** — one context frame, with a round-tripping text codec
//! - **[`LoggingEvent`]** — the immutable record delivered to sinks

mod effectuation;
mod event;
mod step_id;

pub use effectuation::{Effectuation, ParseEffectuationError};
pub use event::LoggingEvent;
pub use step_id::{ParseStepIdError, StepId};
