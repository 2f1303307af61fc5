//! Performance data codec errors.

use std::fmt;
use thiserror::Error;
use thresholds::RangeError;

/// Position of a numeric field within a performance token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Value,
    Warning,
    Critical,
    Min,
    Max,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value => write!(f, "value"),
            Field::Warning => write!(f, "warning"),
            Field::Critical => write!(f, "critical"),
            Field::Min => write!(f, "min"),
            Field::Max => write!(f, "max"),
        }
    }
}

/// A malformed performance token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error("missing '=' in performance token '{0}'")]
    MissingEquals(String),

    #[error("empty label in performance token '{0}'")]
    EmptyLabel(String),

    #[error("invalid label '{0}': labels may not contain '=' or single quotes")]
    InvalidLabel(String),

    #[error("unterminated quote in performance token '{0}'")]
    UnterminatedQuote(String),

    #[error("invalid {field} '{token}'")]
    InvalidValue { field: Field, token: String },

    #[error("invalid {field} range: {source}")]
    InvalidRange {
        field: Field,
        #[source]
        source: RangeError,
    },

    #[error("unrecognized unit of measure '{0}'")]
    UnknownUom(String),

    #[error("too many fields in performance token '{0}'")]
    TooManyFields(String),
}

impl From<PerformanceError> for common::Error {
    fn from(err: PerformanceError) -> Self {
        common::Error::performance(err)
    }
}
