//! # Shared monotonic worst-severity summary.
//!
//! One cell per execution, shared between a supervisor and its parallel
//! siblings. Merging is `max` under the severity order, so the value never
//! decreases; reaching `Fatal` flips the execution into its stopped state.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::severity::Severity;

/// Thread-safe, monotonically non-decreasing severity cell.
///
/// Starts at [`Severity::Info`]: a work item that logged nothing worse
/// than routine facts reports `Info` as its outcome.
///
/// ## Example
/// ```
/// use stepvisor::{Severity, WorstSeverity};
///
/// let worst = WorstSeverity::new();
/// worst.merge(Severity::Warning);
/// worst.merge(Severity::Debug);
/// assert_eq!(worst.get(), Severity::Warning);
/// ```
#[derive(Debug, Clone)]
pub struct WorstSeverity {
    cell: Arc<Mutex<Severity>>,
}

impl WorstSeverity {
    /// Creates a cell initialized to `Info`.
    pub fn new() -> Self {
        Self {
            cell: Arc::new(Mutex::new(Severity::Info)),
        }
    }

    /// Current worst severity.
    pub fn get(&self) -> Severity {
        *self.cell.lock()
    }

    /// Merges `severity` in; the cell only ever moves upward.
    pub fn merge(&self, severity: Severity) {
        let mut current = self.cell.lock();
        if severity > *current {
            *current = severity;
        }
    }

    /// Whether the summary has reached a stopping severity.
    pub fn is_stopping(&self) -> bool {
        self.get().is_stopping()
    }
}

impl Default for WorstSeverity {
    fn default() -> Self {
        Self::new()
    }
}
