//! Human-readable status text fragments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Either a single piece of text or a list of pieces.
///
/// Callers decide which shape they have once, when building the message,
/// instead of every formatting helper inspecting its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Scalar(String),
    Sequence(Vec<String>),
}

impl Message {
    /// Render as one string, joining sequence items with `separator`.
    pub fn join(&self, separator: &str) -> String {
        match self {
            Message::Scalar(text) => text.clone(),
            Message::Sequence(items) => items.join(separator),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Message::Scalar(text) => text.is_empty(),
            Message::Sequence(items) => items.iter().all(String::is_empty),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Scalar(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Scalar(text)
    }
}

impl From<Vec<String>> for Message {
    fn from(items: Vec<String>) -> Self {
        Message::Sequence(items)
    }
}

impl From<Vec<&str>> for Message {
    fn from(items: Vec<&str>) -> Self {
        Message::Sequence(items.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(", "))
    }
}
