//! Warning/critical threshold pairs.

use crate::error::RangeError;
use crate::range::{IntoRange, Range};
use crate::types::Severity;
use serde::{Deserialize, Serialize};

/// A warning range and a critical range, either of which may be unset.
///
/// Critical is always evaluated before warning, so overlapping ranges never
/// downgrade a critical verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warning: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    critical: Option<Range>,
}

impl Threshold {
    pub fn new(warning: Option<Range>, critical: Option<Range>) -> Self {
        Self { warning, critical }
    }

    /// Build from optional range specs, e.g. the values of `-w` and `-c`.
    pub fn from_specs(warning: Option<&str>, critical: Option<&str>) -> Result<Self, RangeError> {
        Ok(Self {
            warning: warning.map(Range::parse).transpose()?,
            critical: critical.map(Range::parse).transpose()?,
        })
    }

    /// Replace the warning range.
    pub fn with_warning(self, warning: impl IntoRange) -> Result<Self, RangeError> {
        Ok(Self {
            warning: Some(warning.into_range()?),
            ..self
        })
    }

    /// Replace the critical range.
    pub fn with_critical(self, critical: impl IntoRange) -> Result<Self, RangeError> {
        Ok(Self {
            critical: Some(critical.into_range()?),
            ..self
        })
    }

    pub fn warning(&self) -> Option<&Range> {
        self.warning.as_ref()
    }

    pub fn critical(&self) -> Option<&Range> {
        self.critical.as_ref()
    }

    /// Reduce a measured value to a severity.
    ///
    /// The caller must pass a finite measurement; values that could not be
    /// measured are reported as UNKNOWN before reaching this point.
    pub fn get_status(&self, value: f64) -> Severity {
        if self.critical.is_some_and(|r| r.check_value(value)) {
            Severity::Critical
        } else if self.warning.is_some_and(|r| r.check_value(value)) {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_bounds() {
        let threshold = Threshold::from_specs(Some("80"), Some("90")).unwrap();
        assert_eq!(threshold.get_status(95.0), Severity::Critical);
        assert_eq!(threshold.get_status(85.0), Severity::Warning);
        assert_eq!(threshold.get_status(10.0), Severity::Ok);
        assert_eq!(threshold.get_status(80.0), Severity::Ok);
        assert_eq!(threshold.get_status(90.0), Severity::Warning);
    }

    #[test]
    fn test_critical_wins_over_warning() {
        // Both ranges alert below 0; critical must be reported.
        let threshold = Threshold::from_specs(Some("10"), Some("20")).unwrap();
        assert_eq!(threshold.get_status(-1.0), Severity::Critical);
    }

    #[test]
    fn test_no_ordering_enforced_between_levels() {
        let threshold = Threshold::from_specs(Some("90"), Some("80")).unwrap();
        assert_eq!(threshold.get_status(85.0), Severity::Critical);
        assert_eq!(threshold.get_status(50.0), Severity::Ok);
    }

    #[test]
    fn test_unset_levels() {
        assert_eq!(Threshold::default().get_status(1e9), Severity::Ok);

        let critical_only = Threshold::from_specs(None, Some("@0:5")).unwrap();
        assert_eq!(critical_only.get_status(3.0), Severity::Critical);
        assert_eq!(critical_only.get_status(6.0), Severity::Ok);

        let warning_only = Threshold::from_specs(Some("10:"), None).unwrap();
        assert_eq!(warning_only.get_status(3.0), Severity::Warning);
    }

    #[test]
    fn test_builder() {
        let threshold = Threshold::default()
            .with_warning(80)
            .and_then(|t| t.with_critical("~:90"))
            .unwrap();
        assert_eq!(threshold.warning(), Some(&Range::parse("80").unwrap()));
        assert_eq!(threshold.critical(), Some(&Range::parse("~:90").unwrap()));
        assert_eq!(threshold.get_status(95.0), Severity::Critical);
    }

    #[test]
    fn test_invalid_spec_propagates() {
        assert!(matches!(
            Threshold::from_specs(Some("abc"), Some("90")),
            Err(RangeError::InvalidRange { .. })
        ));
        assert!(matches!(
            Threshold::from_specs(Some("80"), Some("-5")),
            Err(RangeError::InvalidRangeValue { .. })
        ));
    }

    #[test]
    fn test_serde() {
        let threshold = Threshold::from_specs(Some("80"), None).unwrap();
        let json = serde_json::to_string(&threshold).unwrap();
        assert_eq!(json, r#"{"warning":"80"}"#);
        let back: Threshold = serde_json::from_str(&json).unwrap();
        assert_eq!(back, threshold);
    }
}
