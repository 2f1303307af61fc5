//! Severity verdicts produced by threshold evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating a value against a [`Threshold`](crate::Threshold).
///
/// Ordered `Ok < Warning < Critical`. States a check can report that are not
/// threshold verdicts (UNKNOWN, DEPENDENT) live in the plugin crate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// Worst severity of a sequence, `Ok` when empty.
    pub fn worst<I>(severities: I) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        severities.into_iter().max().unwrap_or_default()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "OK"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}
