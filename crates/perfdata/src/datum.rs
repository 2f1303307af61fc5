//! Performance data token format and parsing.
//!
//! Nagios plugin guidelines, "Performance data"
//!
//! ```text
//! 'label'=value[UOM];[warn];[crit];[min];[max]
//! ```
//!
//! - the label is quoted when it contains whitespace; it may not contain
//!   `=` or `'`
//! - `value` is a decimal number or `U` when the value could not be measured
//! - `warn` and `crit` use the range syntax of [`thresholds::Range`]
//! - `min` and `max` are numbers; `~` marks an unbounded side and is read as
//!   no bound
//! - trailing empty fields are dropped when rendering

use crate::error::{Field, PerformanceError};
use crate::uom::Uom;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thresholds::{Range, Threshold};
use tracing::debug;

/// Number of `;`-separated fields after the label: value, warn, crit, min, max.
const MAX_FIELDS: usize = 5;

/// Rendering of a value that could not be measured.
const UNKNOWN_VALUE: &str = "U";

/// Infinity marker accepted in the min and max fields.
const UNBOUNDED: &str = "~";

static VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>[-+]?[0-9.,]+|U)(?P<uom>[A-Za-z%/]*)$")
        .expect("value pattern is a valid regex")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9.,]+$").expect("number pattern is a valid regex"));

/// One labelled metric sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceDatum {
    label: String,
    value: Option<f64>,
    uom: Uom,
    warning: Option<Range>,
    critical: Option<Range>,
    min: Option<f64>,
    max: Option<f64>,
}

impl PerformanceDatum {
    /// Create a datum with a measured value.
    pub fn new(label: impl Into<String>, value: f64) -> Result<Self, PerformanceError> {
        if !value.is_finite() {
            return Err(PerformanceError::InvalidValue {
                field: Field::Value,
                token: value.to_string(),
            });
        }
        let mut datum = Self::unknown(label)?;
        datum.value = Some(value);
        Ok(datum)
    }

    /// Create a datum whose value could not be measured (rendered as `U`).
    pub fn unknown(label: impl Into<String>) -> Result<Self, PerformanceError> {
        let label = label.into();
        validate_label(&label, &label)?;
        Ok(Self {
            label,
            value: None,
            uom: Uom::None,
            warning: None,
            critical: None,
            min: None,
            max: None,
        })
    }

    pub fn with_uom(mut self, uom: impl Into<Uom>) -> Self {
        self.uom = uom.into();
        self
    }

    pub fn with_warning(mut self, warning: Range) -> Self {
        self.warning = Some(warning);
        self
    }

    pub fn with_critical(mut self, critical: Range) -> Self {
        self.critical = Some(critical);
        self
    }

    /// Copy both levels of a threshold; unset levels clear the field.
    pub fn with_threshold(mut self, threshold: &Threshold) -> Self {
        self.warning = threshold.warning().copied();
        self.critical = threshold.critical().copied();
        self
    }

    /// Non-finite minimums are dropped.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min).filter(|m| m.is_finite());
        self
    }

    /// Non-finite maximums are dropped.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max).filter(|m| m.is_finite());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The measured value, `None` when unknown.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn uom(&self) -> &Uom {
        &self.uom
    }

    pub fn warning(&self) -> Option<&Range> {
        self.warning.as_ref()
    }

    pub fn critical(&self) -> Option<&Range> {
        self.critical.as_ref()
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Parse a single token, passing unknown units through.
    pub fn parse(token: &str) -> Result<Self, PerformanceError> {
        Self::parse_with(token, false)
    }

    /// Parse a single token, rejecting units outside the standard set.
    pub fn parse_strict(token: &str) -> Result<Self, PerformanceError> {
        Self::parse_with(token, true)
    }

    fn parse_with(token: &str, strict: bool) -> Result<Self, PerformanceError> {
        let token = token.trim();
        let (label, rest) = split_label(token)?;
        validate_label(label, token)?;

        let fields: Vec<&str> = rest.split(';').collect();
        let trailing_separator = fields.len() == MAX_FIELDS + 1 && fields[MAX_FIELDS].is_empty();
        if fields.len() > MAX_FIELDS && !trailing_separator {
            return Err(PerformanceError::TooManyFields(token.to_string()));
        }
        let field = |i: usize| fields.get(i).copied().filter(|f| !f.is_empty());

        let caps = VALUE_RE
            .captures(fields[0])
            .ok_or_else(|| PerformanceError::InvalidValue {
                field: Field::Value,
                token: fields[0].to_string(),
            })?;
        let value = match &caps["value"] {
            UNKNOWN_VALUE => None,
            number => Some(parse_number(Field::Value, number)?),
        };
        let uom = match &caps["uom"] {
            uom if strict => Uom::parse_strict(uom)?,
            uom => Uom::parse(uom),
        };

        let datum = Self {
            label: label.to_string(),
            value,
            uom,
            warning: field(1).map(|f| parse_range(Field::Warning, f)).transpose()?,
            critical: field(2).map(|f| parse_range(Field::Critical, f)).transpose()?,
            min: field(3).map(|f| parse_bound(Field::Min, f)).transpose()?.flatten(),
            max: field(4).map(|f| parse_bound(Field::Max, f)).transpose()?.flatten(),
        };
        debug!(token, label = %datum.label, "parsed performance datum");
        Ok(datum)
    }
}

/// Split `label=rest`, unquoting a quoted label.
fn split_label(token: &str) -> Result<(&str, &str), PerformanceError> {
    if let Some(quoted) = token.strip_prefix('\'') {
        let close = quoted
            .find('\'')
            .ok_or_else(|| PerformanceError::UnterminatedQuote(token.to_string()))?;
        let label = &quoted[..close];
        let after = &quoted[close + 1..];
        return match after.strip_prefix('=') {
            Some(rest) => Ok((label, rest)),
            None => match after.find('=') {
                Some(eq) => Err(PerformanceError::InvalidLabel(quoted[..close + 1 + eq].to_string())),
                None => Err(PerformanceError::MissingEquals(token.to_string())),
            },
        };
    }

    token
        .split_once('=')
        .ok_or_else(|| PerformanceError::MissingEquals(token.to_string()))
}

fn validate_label(label: &str, token: &str) -> Result<(), PerformanceError> {
    if label.is_empty() {
        return Err(PerformanceError::EmptyLabel(token.to_string()));
    }
    if label.contains(['=', '\'']) {
        return Err(PerformanceError::InvalidLabel(label.to_string()));
    }
    Ok(())
}

/// Decimal commas are accepted on input. Numbers too large for an `f64`
/// are rejected.
fn parse_number(field: Field, token: &str) -> Result<f64, PerformanceError> {
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| PerformanceError::InvalidValue {
            field,
            token: token.to_string(),
        })
}

/// A min or max field; `~` yields no bound.
fn parse_bound(field: Field, token: &str) -> Result<Option<f64>, PerformanceError> {
    if token == UNBOUNDED {
        return Ok(None);
    }
    if !NUMBER_RE.is_match(token) {
        return Err(PerformanceError::InvalidValue {
            field,
            token: token.to_string(),
        });
    }
    parse_number(field, token).map(Some)
}

fn parse_range(field: Field, token: &str) -> Result<Range, PerformanceError> {
    Range::parse(&token.replace(',', "."))
        .map_err(|source| PerformanceError::InvalidRange { field, source })
}

impl fmt::Display for PerformanceDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.chars().any(char::is_whitespace) {
            write!(f, "'{}'=", self.label)?;
        } else {
            write!(f, "{}=", self.label)?;
        }
        match self.value {
            Some(value) => write!(f, "{}{}", value, self.uom)?,
            None => write!(f, "{}{}", UNKNOWN_VALUE, self.uom)?,
        }

        let tail = [
            self.warning.map(|r| r.to_string()),
            self.critical.map(|r| r.to_string()),
            self.min.map(|m| m.to_string()),
            self.max.map(|m| m.to_string()),
        ];
        let used = tail.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        for field in &tail[..used] {
            write!(f, ";{}", field.as_deref().unwrap_or(""))?;
        }
        Ok(())
    }
}

impl FromStr for PerformanceDatum {
    type Err = PerformanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PerformanceDatum::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(token: &str) -> PerformanceDatum {
        PerformanceDatum::parse(token).unwrap()
    }

    #[test]
    fn test_full_token_round_trip() {
        let d = datum("load=1.5;2;5;0;10");
        assert_eq!(d.label(), "load");
        assert_eq!(d.value(), Some(1.5));
        assert_eq!(d.uom(), &Uom::None);
        assert_eq!(d.warning(), Some(&Range::parse("2").unwrap()));
        assert_eq!(d.critical(), Some(&Range::parse("5").unwrap()));
        assert_eq!(d.min(), Some(0.0));
        assert_eq!(d.max(), Some(10.0));
        assert_eq!(d.to_string(), "load=1.5;2;5;0;10");
    }

    #[test]
    fn test_quoted_label() {
        let d = datum("'disk free'=512MB;1000;500");
        assert_eq!(d.label(), "disk free");
        assert_eq!(d.value(), Some(512.0));
        assert_eq!(d.uom(), &Uom::Megabytes);
        assert_eq!(d.to_string(), "'disk free'=512MB;1000;500");
    }

    #[test]
    fn test_quoted_label_without_whitespace_renders_bare() {
        assert_eq!(datum("'root'=1").to_string(), "root=1");
    }

    #[test]
    fn test_missing_equals() {
        assert_eq!(
            PerformanceDatum::parse("bad_token_no_equals"),
            Err(PerformanceError::MissingEquals("bad_token_no_equals".to_string()))
        );
        assert!(matches!(
            PerformanceDatum::parse("'quoted label'"),
            Err(PerformanceError::MissingEquals(_))
        ));
    }

    #[test]
    fn test_label_errors() {
        assert!(matches!(PerformanceDatum::parse("=1"), Err(PerformanceError::EmptyLabel(_))));
        assert!(matches!(PerformanceDatum::parse("''=1"), Err(PerformanceError::EmptyLabel(_))));
        assert!(matches!(
            PerformanceDatum::parse("it's=1"),
            Err(PerformanceError::InvalidLabel(_))
        ));
        assert!(matches!(
            PerformanceDatum::parse("'a=b'=1"),
            Err(PerformanceError::InvalidLabel(_))
        ));
        assert!(matches!(
            PerformanceDatum::parse("'a'b=1"),
            Err(PerformanceError::InvalidLabel(_))
        ));
        assert!(matches!(
            PerformanceDatum::parse("'disk free=1"),
            Err(PerformanceError::UnterminatedQuote(_))
        ));
    }

    #[test]
    fn test_value_errors() {
        for token in ["a=", "a=abc", "a=1.2.3", "a=.", "a=1e5", "a=--1"] {
            assert!(
                matches!(
                    PerformanceDatum::parse(token),
                    Err(PerformanceError::InvalidValue { field: Field::Value, .. })
                ),
                "expected value error for {:?}",
                token
            );
        }
    }

    #[test]
    fn test_threshold_and_bound_errors() {
        assert!(matches!(
            PerformanceDatum::parse("a=1;x"),
            Err(PerformanceError::InvalidRange { field: Field::Warning, .. })
        ));
        assert!(matches!(
            PerformanceDatum::parse("a=1;;20:10"),
            Err(PerformanceError::InvalidRange { field: Field::Critical, .. })
        ));
        assert!(matches!(
            PerformanceDatum::parse("a=1;;;low"),
            Err(PerformanceError::InvalidValue { field: Field::Min, .. })
        ));
        assert!(matches!(
            PerformanceDatum::parse("a=1;;;;~:"),
            Err(PerformanceError::InvalidValue { field: Field::Max, .. })
        ));
        assert!(matches!(
            PerformanceDatum::parse("a=1;2;3;4;5;6"),
            Err(PerformanceError::TooManyFields(_))
        ));
    }

    #[test]
    fn test_overflowing_numbers_rejected() {
        let huge = "9".repeat(400);
        assert_eq!(
            PerformanceDatum::parse(&format!("a={}", huge)),
            Err(PerformanceError::InvalidValue {
                field: Field::Value,
                token: huge.clone(),
            })
        );
        assert!(matches!(
            PerformanceDatum::parse(&format!("a=1;;;-{}", huge)),
            Err(PerformanceError::InvalidValue { field: Field::Min, .. })
        ));
        assert!(matches!(
            PerformanceDatum::parse(&format!("a=1;;;0;{}", huge)),
            Err(PerformanceError::InvalidValue { field: Field::Max, .. })
        ));
    }

    #[test]
    fn test_unbounded_min_and_max() {
        let d = datum("a=1;;;~;100");
        assert_eq!(d.min(), None);
        assert_eq!(d.max(), Some(100.0));
        assert_eq!(d.to_string(), "a=1;;;;100");
        assert_eq!(PerformanceDatum::parse(&d.to_string()).unwrap(), d);

        let d = datum("a=1;5;10;0;~");
        assert_eq!(d.min(), Some(0.0));
        assert_eq!(d.max(), None);
        assert_eq!(d.to_string(), "a=1;5;10;0");
        assert_eq!(PerformanceDatum::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn test_unknown_value() {
        let d = datum("rtt=U;100;200");
        assert_eq!(d.value(), None);
        assert_eq!(d.to_string(), "rtt=U;100;200");

        let d = datum("rtt=Ums");
        assert_eq!(d.value(), None);
        assert_eq!(d.uom(), &Uom::Milliseconds);
    }

    #[test]
    fn test_trailing_empty_fields_omitted() {
        assert_eq!(datum("a=1;;;;").to_string(), "a=1");
        assert_eq!(datum("a=1;;;0;").to_string(), "a=1;;;0");
        assert_eq!(datum("a=1;2;3;4;5;").to_string(), "a=1;2;3;4;5");
        assert_eq!(datum("a=1;;5").to_string(), "a=1;;5");
    }

    #[test]
    fn test_range_thresholds() {
        let d = datum("temp=42.5;@10:20;~:50");
        assert!(d.warning().unwrap().alert_on_inside_range());
        assert!(d.critical().unwrap().is_start_infinite());
        assert_eq!(d.to_string(), "temp=42.5;@10:20;~:50");
    }

    #[test]
    fn test_decimal_comma() {
        let d = datum("load=1,5;2,5;3,0");
        assert_eq!(d.value(), Some(1.5));
        assert_eq!(d.warning(), Some(&Range::parse("2.5").unwrap()));
        assert_eq!(d.to_string(), "load=1.5;2.5;3");
    }

    #[test]
    fn test_custom_uom() {
        let d = datum("rate=12req/s");
        assert_eq!(d.uom(), &Uom::Custom("req/s".to_string()));
        assert_eq!(d.to_string(), "rate=12req/s");
        assert_eq!(
            PerformanceDatum::parse_strict("rate=12req/s"),
            Err(PerformanceError::UnknownUom("req/s".to_string()))
        );
        assert!(PerformanceDatum::parse_strict("used=12%").is_ok());
    }

    #[test]
    fn test_builder() {
        let threshold = Threshold::from_specs(Some("80"), Some("90")).unwrap();
        let d = PerformanceDatum::new("cpu usage", 42.0)
            .unwrap()
            .with_uom(Uom::Percent)
            .with_threshold(&threshold)
            .with_min(0.0)
            .with_max(100.0);
        assert_eq!(d.to_string(), "'cpu usage'=42%;80;90;0;100");
        assert_eq!(PerformanceDatum::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn test_builder_uom_stays_parseable() {
        let d = PerformanceDatum::new("a", 5.0).unwrap().with_uom("1");
        assert_eq!(d.to_string(), "a=5");
        assert_eq!(PerformanceDatum::parse(&d.to_string()).unwrap(), d);

        let d = PerformanceDatum::new("a", 5.0).unwrap().with_uom("req/s;2");
        assert_eq!(d.to_string(), "a=5req/s");
        assert_eq!(PerformanceDatum::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(PerformanceDatum::new("", 1.0), Err(PerformanceError::EmptyLabel(_))));
        assert!(matches!(
            PerformanceDatum::new("a=b", 1.0),
            Err(PerformanceError::InvalidLabel(_))
        ));
        assert!(PerformanceDatum::new("a", f64::NAN).is_err());
        assert!(PerformanceDatum::new("a", f64::INFINITY).is_err());

        let d = PerformanceDatum::new("a", 1.0).unwrap().with_min(f64::NEG_INFINITY);
        assert_eq!(d.min(), None);
    }

    #[test]
    fn test_negative_and_signed_values() {
        let d = datum("offset=-0.25s;-1:1;-2:2;-10;+10");
        assert_eq!(d.value(), Some(-0.25));
        assert_eq!(d.uom(), &Uom::Seconds);
        assert_eq!(d.min(), Some(-10.0));
        assert_eq!(d.max(), Some(10.0));
        assert_eq!(d.to_string(), "offset=-0.25s;-1:1;-2:2;-10;10");
    }
}
