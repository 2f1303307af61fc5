//! Range parsing errors.

use thiserror::Error;

/// Errors raised while building a [`Range`](crate::Range).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The spec does not follow the range grammar.
    #[error("invalid range '{spec}': {reason}")]
    InvalidRange { spec: String, reason: String },

    /// The spec is well-formed but describes an impossible interval.
    #[error("invalid range value '{spec}': {reason}")]
    InvalidRangeValue { spec: String, reason: String },
}

impl RangeError {
    pub(crate) fn invalid(spec: &str, reason: impl Into<String>) -> Self {
        RangeError::InvalidRange {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_value(spec: &str, reason: impl Into<String>) -> Self {
        RangeError::InvalidRangeValue {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }

    /// The offending range text.
    pub fn spec(&self) -> &str {
        match self {
            RangeError::InvalidRange { spec, .. } | RangeError::InvalidRangeValue { spec, .. } => {
                spec
            }
        }
    }
}

impl From<RangeError> for common::Error {
    fn from(err: RangeError) -> Self {
        common::Error::range(err)
    }
}
