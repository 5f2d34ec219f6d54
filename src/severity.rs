//! # Severity taxonomy for logging events.
//!
//! [`Severity`] is a totally ordered scale. The order is load-bearing:
//! severity filters compare against it, the appease operator caps it, and
//! the worst-severity cell merges with `max` under it.
//!
//! | Severity | Meaning |
//! |----------|---------|
//! | `Debug` | Diagnostic detail, normally suppressed. |
//! | `Progress` | Step open/close markers and other flow tracing. |
//! | `Info` | Routine facts worth keeping. |
//! | `Iteration` | Per-item facts inside a loop. |
//! | `Warning` | Recoverable issue, no action needed. |
//! | `Error` | The current operation failed. |
//! | `Fatal` | The work item cannot continue. |
//! | `Loss` | The per-item worker is lost (crashed or hanging). |
//! | `Deadly` | The whole process cannot continue. |
//!
//! `Fatal` and above mark the execution as stopped.
//!
//! ## Example
//! ```
//! use stepvisor::Severity;
//!
//! assert!(Severity::Warning < Severity::Error);
//! assert!(Severity::Fatal.is_stopping());
//! assert_eq!(Severity::Loss.to_string(), "Loss");
//! assert_eq!("Iteration".parse::<Severity>().unwrap(), Severity::Iteration);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Totally ordered severity of a logging event.
///
/// Serialized names are stable: they are the variant names as written.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// Diagnostic detail.
    Debug,
    /// Flow tracing (step open/close markers).
    Progress,
    /// Routine fact.
    Info,
    /// Per-item fact inside a loop.
    Iteration,
    /// Recoverable issue.
    Warning,
    /// The current operation failed.
    Error,
    /// The work item cannot continue.
    Fatal,
    /// The per-item worker is lost.
    Loss,
    /// The whole process cannot continue.
    Deadly,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Severity; 9] = [
        Severity::Debug,
        Severity::Progress,
        Severity::Info,
        Severity::Iteration,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
        Severity::Loss,
        Severity::Deadly,
    ];

    /// Whether this severity marks the execution as stopped (`Fatal` and above).
    pub fn is_stopping(self) -> bool {
        self >= Severity::Fatal
    }

    /// Stable name used in serialized events and log files.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Progress => "Progress",
            Severity::Info => "Info",
            Severity::Iteration => "Iteration",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
            Severity::Loss => "Loss",
            Severity::Deadly => "Deadly",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.name() == s)
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}
