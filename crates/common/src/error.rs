//! Common error type for monplug components.

use std::fmt;

/// A specialized Result type for monplug operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Workspace-wide error type.
///
/// Domain crates keep their own precise error enums and convert into this
/// one at the point where a check is assembled.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Range error: {0}")]
    Range(String),

    #[error("Performance data error: {0}")]
    Performance(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Check error: {0}")]
    Check(String),

    #[error("Unknown error: {0}")]
    Other(String),
}

impl Error {
    /// Create a new range error.
    pub fn range(msg: impl fmt::Display) -> Self {
        Error::Range(msg.to_string())
    }

    /// Create a new performance data error.
    pub fn performance(msg: impl fmt::Display) -> Self {
        Error::Performance(msg.to_string())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl fmt::Display) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new check error.
    pub fn check(msg: impl fmt::Display) -> Self {
        Error::Check(msg.to_string())
    }

    /// Create a new other error.
    pub fn other(msg: impl fmt::Display) -> Self {
        Error::Other(msg.to_string())
    }
}
