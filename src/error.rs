//! # Error types used by the sink pipeline.
//!
//! [`SinkError`] covers the failures a sink can report from `close()`.
//! Failures on the logging path itself never surface here: background
//! sinks write their I/O errors to standard error and keep going, so a
//! broken log destination cannot take the execution down with it.

use thiserror::Error;

/// # Errors produced when closing a sink.
///
/// Logging is fire-and-forget; `close()` is the only point where a sink
/// reports failure to its caller.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SinkError {
    /// Underlying I/O failure (file creation, write, flush).
    #[error("sink I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The user-provided close action reported a failure.
    #[error("close action failed: {reason}")]
    Close {
        /// Description supplied by the close action.
        reason: String,
    },

    /// The background worker thread terminated abnormally.
    #[error("background sink worker panicked")]
    WorkerPanicked,
}
