//! # Execution core: the supervisor and its moving parts.
//!
//! - **[`Supervisor`]** — drives the step tree of one work item
//! - **[`WorstSeverity`]** — shared monotonic severity summary
//! - **[`PauseGate`]** — single-slot gate observed by sync step entries
//! - async operator family — `*_async` methods on [`Supervisor`]

mod async_ops;
mod pause;
mod supervisor;
mod worst;

pub use async_ops::{async_body, BoxStepFuture};
pub use pause::PauseGate;
pub use supervisor::{StepHook, Supervisor};
pub use worst::WorstSeverity;
