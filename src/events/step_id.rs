//! # Structural step identity.
//!
//! A [`StepId`] identifies a step by its cross-module file designation and
//! function signature. Equality and hash are structural over both fields;
//! the dedup set of a supervisor is keyed by this identity, so two call
//! sites that construct the same `StepId` collide intentionally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of a step: `(file, signature)`.
///
/// Canonical text form is `signature@file`. The
/// [`step_id!`](crate::step_id) macro builds one from the current source
/// file.
///
/// ## Example
/// ```
/// use stepvisor::StepId;
///
/// let id = StepId::new("script1", "function1");
/// assert_eq!(id.to_string(), "function1@script1");
/// assert_eq!("function1@script1".parse::<StepId>().unwrap(), id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId {
    file: String,
    signature: String,
}

impl StepId {
    /// Creates a step id from a file designation and a function signature.
    pub fn new(file: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            signature: signature.into(),
        }
    }

    /// Cross-module file designation.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Function signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.signature, self.file)
    }
}

/// Error returned when parsing a step id without a `@` separator.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("step id is missing the '@' separator: {0}")]
pub struct ParseStepIdError(String);

impl FromStr for StepId {
    type Err = ParseStepIdError;

    /// Parses the canonical `signature@file` form. The last `@` separates
    /// the two fields, so signatures may themselves contain `@`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (signature, file) = s
            .rsplit_once('@')
            .ok_or_else(|| ParseStepIdError(s.to_string()))?;
        Ok(StepId::new(file, signature))
    }
}
