//! Per-metric threshold configuration.
//!
//! ```yaml
//! metrics:
//!   - label: load1
//!     warning: "5"
//!     critical: "10"
//!   - label: "disk free"
//!     critical: "@0:500"
//!     uom: MB
//!     min: 0
//! ```

use perfdata::Uom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use thresholds::{Range, RangeError, Threshold};
use validator::{Validate, ValidationError, ValidationErrors};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid threshold: {0}")]
    RangeError(#[from] RangeError),
}

impl From<ConfigError> for common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::IoError(e) => common::Error::Io(e),
            ConfigError::ParseError(e) => common::Error::Yaml(e),
            other => common::Error::config(other),
        }
    }
}

/// Thresholds for the metrics of one check, keyed by label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

impl Validate for ThresholdConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut seen = HashSet::new();
        for metric in &self.metrics {
            metric.validate()?;
            if !seen.insert(metric.label.as_str()) {
                let mut errors = ValidationErrors::new();
                errors.add("metrics", ValidationError::new("duplicate_label"));
                return Err(errors);
            }
        }
        Ok(())
    }
}

/// Settings for one metric label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_min_max"))]
pub struct MetricConfig {
    #[validate(length(min = 1), custom = "validate_label")]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_range")]
    pub warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_range")]
    pub critical: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<Uom>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl MetricConfig {
    /// Parse the configured range strings.
    pub fn threshold(&self) -> Result<Threshold, RangeError> {
        Threshold::from_specs(self.warning.as_deref(), self.critical.as_deref())
    }
}

// Custom validators

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.contains(['=', '\'']) {
        return Err(ValidationError::new("label_invalid_character"));
    }
    Ok(())
}

fn validate_range(spec: &str) -> Result<(), ValidationError> {
    Range::parse(spec)
        .map(|_| ())
        .map_err(|_| ValidationError::new("range_invalid"))
}

fn validate_min_max(metric: &MetricConfig) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (metric.min, metric.max)
        && min > max
    {
        return Err(ValidationError::new("min_greater_than_max"));
    }
    Ok(())
}

// Configuration loading implementation

impl ThresholdConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: ThresholdConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&contents)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            metrics = config.metrics.len(),
            "loaded threshold configuration"
        );
        Ok(config)
    }

    /// Settings for `label`, if configured.
    pub fn get(&self, label: &str) -> Option<&MetricConfig> {
        self.metrics.iter().find(|m| m.label == label)
    }
}
