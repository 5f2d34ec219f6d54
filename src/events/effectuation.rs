//! # Effectuation frames and their textual codec.
//!
//! An [`Effectuation`] records one frame on the supervisor's context
//! stack. Frames round-trip through a canonical text encoding; log
//! consumers recover the frame kind by prefix match and the payload by
//! parsing the remainder.
//!
//! | Variant | Text form |
//! |---------|-----------|
//! | `Step` | `step <signature>@<file>` |
//! | `OptionalPart` | `optional part "<name>"` |
//! | `DispensablePart` | `dispensable part "<name>"` |
//! | `DescribedPart` | `doing "<description>"` |
//!
//! The JSON form wraps the canonical text: `{"effectuation": "<text>"}`.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::events::step_id::StepId;

const STEP_PREFIX: &str = "step ";
const OPTIONAL_PREFIX: &str = "optional part ";
const DISPENSABLE_PREFIX: &str = "dispensable part ";
const DOING_PREFIX: &str = "doing ";

/// One frame on a supervisor's effectuation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effectuation {
    /// A step entry, identified by its [`StepId`].
    Step(StepId),
    /// An optional part, by name.
    OptionalPart(String),
    /// A dispensable part, by name.
    DispensablePart(String),
    /// A described part, by free-form description.
    DescribedPart(String),
}

impl fmt::Display for Effectuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effectuation::Step(id) => write!(f, "{STEP_PREFIX}{id}"),
            Effectuation::OptionalPart(name) => write!(f, "{OPTIONAL_PREFIX}\"{name}\""),
            Effectuation::DispensablePart(name) => {
                write!(f, "{DISPENSABLE_PREFIX}\"{name}\"")
            }
            Effectuation::DescribedPart(description) => {
                write!(f, "{DOING_PREFIX}\"{description}\"")
            }
        }
    }
}

/// Error returned when decoding an effectuation text.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseEffectuationError {
    /// No known frame prefix matched.
    #[error("unrecognized effectuation: {0}")]
    UnknownKind(String),
    /// The payload after the prefix was malformed.
    #[error("malformed effectuation payload: {0}")]
    BadPayload(String),
}

impl FromStr for Effectuation {
    type Err = ParseEffectuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix(STEP_PREFIX) {
            let id = rest
                .parse::<StepId>()
                .map_err(|_| ParseEffectuationError::BadPayload(s.to_string()))?;
            return Ok(Effectuation::Step(id));
        }
        if let Some(rest) = s.strip_prefix(OPTIONAL_PREFIX) {
            return Ok(Effectuation::OptionalPart(unquote(s, rest)?));
        }
        if let Some(rest) = s.strip_prefix(DISPENSABLE_PREFIX) {
            return Ok(Effectuation::DispensablePart(unquote(s, rest)?));
        }
        if let Some(rest) = s.strip_prefix(DOING_PREFIX) {
            return Ok(Effectuation::DescribedPart(unquote(s, rest)?));
        }
        Err(ParseEffectuationError::UnknownKind(s.to_string()))
    }
}

fn unquote(whole: &str, payload: &str) -> Result<String, ParseEffectuationError> {
    payload
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .map(str::to_string)
        .ok_or_else(|| ParseEffectuationError::BadPayload(whole.to_string()))
}

impl Serialize for Effectuation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Effectuation", 1)?;
        record.serialize_field("effectuation", &self.to_string())?;
        record.end()
    }
}

impl<'de> Deserialize<'de> for Effectuation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            effectuation: String,
        }
        let wire = Wire::deserialize(deserializer)?;
        wire.effectuation.parse().map_err(D::Error::custom)
    }
}
