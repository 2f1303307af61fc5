//! Service states reported to the monitoring controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use thresholds::Severity;

/// Final state of a check, mapped to the plugin's exit code.
///
/// `Unknown` and `Dependent` are not threshold verdicts, so there is no
/// numeric ordering; [`ServiceState::merge`] spells out the precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    /// The check could not determine the state.
    Unknown,
    /// The state depends on another, failing service.
    Dependent,
}

impl ServiceState {
    pub fn exit_code(self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
            ServiceState::Dependent => 4,
        }
    }

    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ServiceState::Ok),
            1 => Some(ServiceState::Warning),
            2 => Some(ServiceState::Critical),
            3 => Some(ServiceState::Unknown),
            4 => Some(ServiceState::Dependent),
            _ => None,
        }
    }

    /// Combine two states: Critical > Warning > Unknown > Dependent > Ok.
    pub fn merge(self, other: ServiceState) -> ServiceState {
        use ServiceState::*;

        match (self, other) {
            (Critical, _) | (_, Critical) => Critical,
            (Warning, _) | (_, Warning) => Warning,
            (Unknown, _) | (_, Unknown) => Unknown,
            (Dependent, _) | (_, Dependent) => Dependent,
            (Ok, Ok) => Ok,
        }
    }

    /// Merge of a sequence of states, `Ok` when empty.
    pub fn worst<I>(states: I) -> ServiceState
    where
        I: IntoIterator<Item = ServiceState>,
    {
        states.into_iter().fold(ServiceState::Ok, ServiceState::merge)
    }
}

impl From<Severity> for ServiceState {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Ok => ServiceState::Ok,
            Severity::Warning => ServiceState::Warning,
            Severity::Critical => ServiceState::Critical,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Ok => write!(f, "OK"),
            ServiceState::Warning => write!(f, "WARNING"),
            ServiceState::Critical => write!(f, "CRITICAL"),
            ServiceState::Unknown => write!(f, "UNKNOWN"),
            ServiceState::Dependent => write!(f, "DEPENDENT"),
        }
    }
}
