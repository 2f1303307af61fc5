//! Range expressions following the Nagios plugin development guidelines.
//!
//! ```text
//! range := ['@'] [start] ':' [end] | ['@'] end
//! start := number | '~'
//! end   := number
//! ```
//!
//! A value *outside* `[start, end]` raises an alert. The `@` prefix inverts
//! this so that a value *inside* the interval alerts instead.
//!
//! | Spec      | Alerts when            |
//! |-----------|------------------------|
//! | `10`      | `x < 0` or `x > 10`    |
//! | `10:`     | `x < 10`               |
//! | `~:10`    | `x > 10`               |
//! | `10:20`   | `x < 10` or `x > 20`   |
//! | `@10:20`  | `10 <= x <= 20`        |

use crate::error::RangeError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<inside>@)?(?:(?P<start>~|[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))?(?P<colon>:))?(?P<end>[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))?$",
    )
    .expect("range pattern is a valid regex")
});

/// An alert interval with optional infinite bounds and an inversion flag.
///
/// Immutable once built. An infinite start is stored as `-inf` and an
/// infinite end as `+inf`, so derived equality compares the interval itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    start: f64,
    end: f64,
    start_infinite: bool,
    end_infinite: bool,
    alert_on_inside_range: bool,
}

impl Range {
    /// Build a range from explicit bounds. `None` means infinite on that side.
    pub fn new(
        start: Option<f64>,
        end: Option<f64>,
        alert_on_inside_range: bool,
    ) -> Result<Self, RangeError> {
        let spec = render_bounds(start, end, alert_on_inside_range);
        Self::build(&spec, start, end, alert_on_inside_range)
    }

    /// The range `~:`, which contains every value.
    pub fn unbounded() -> Self {
        Self {
            start: f64::NEG_INFINITY,
            end: f64::INFINITY,
            start_infinite: true,
            end_infinite: true,
            alert_on_inside_range: false,
        }
    }

    /// Parse a textual range spec.
    ///
    /// A bare `@` is treated as `@~:` and a bare `:` as `~:`. The empty string
    /// is rejected.
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        let text = spec.trim();
        if text.is_empty() {
            return Err(RangeError::invalid(spec, "empty range"));
        }

        let caps = RANGE_RE
            .captures(text)
            .ok_or_else(|| RangeError::invalid(spec, "expected [@][start:][end]"))?;

        let inside = caps.name("inside").is_some();
        let has_colon = caps.name("colon").is_some();
        let start = caps.name("start").map(|m| m.as_str());
        let end = caps.name("end").map(|m| parse_bound(spec, m.as_str())).transpose()?;

        let (start, end) = match (start, has_colon, end) {
            (None, _, None) => (None, None),
            (Some("~"), _, end) => (None, end),
            (Some(start), _, end) => (Some(parse_bound(spec, start)?), end),
            (None, true, end) => (Some(0.0), end),
            (None, false, Some(end)) => {
                if end < 0.0 {
                    return Err(RangeError::invalid_value(
                        spec,
                        "negative upper bound needs an explicit start",
                    ));
                }
                (Some(0.0), Some(end))
            }
        };

        let range = Self::build(spec, start, end, inside)?;
        debug!(spec, range = %range, "parsed range");
        Ok(range)
    }

    fn build(
        spec: &str,
        start: Option<f64>,
        end: Option<f64>,
        alert_on_inside_range: bool,
    ) -> Result<Self, RangeError> {
        if start.is_some_and(f64::is_nan) || end.is_some_and(f64::is_nan) {
            return Err(RangeError::invalid_value(spec, "bound is not a number"));
        }
        if start == Some(f64::INFINITY) || end == Some(f64::NEG_INFINITY) {
            return Err(RangeError::invalid_value(spec, "bound is infinite on the wrong side"));
        }

        let start = start.filter(|s| s.is_finite());
        let end = end.filter(|e| e.is_finite());

        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err(RangeError::invalid_value(
                spec,
                format!("start {} is greater than end {}", s, e),
            ));
        }

        Ok(Self {
            start: start.unwrap_or(f64::NEG_INFINITY),
            end: end.unwrap_or(f64::INFINITY),
            start_infinite: start.is_none(),
            end_infinite: end.is_none(),
            alert_on_inside_range,
        })
    }

    /// Lower bound, `-inf` when unbounded.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound, `+inf` when unbounded.
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_start_infinite(&self) -> bool {
        self.start_infinite
    }

    pub fn is_end_infinite(&self) -> bool {
        self.end_infinite
    }

    /// Whether the `@` prefix was given.
    pub fn alert_on_inside_range(&self) -> bool {
        self.alert_on_inside_range
    }

    /// Same interval with the alert side flipped.
    pub fn inverted(self) -> Self {
        Self {
            alert_on_inside_range: !self.alert_on_inside_range,
            ..self
        }
    }

    /// True when `value` lies within `[start, end]`. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        (self.start_infinite || self.start <= value) && (self.end_infinite || value <= self.end)
    }

    /// True when `value` should raise an alert.
    pub fn check_value(&self, value: f64) -> bool {
        self.contains(value) == self.alert_on_inside_range
    }
}

fn parse_bound(spec: &str, token: &str) -> Result<f64, RangeError> {
    token
        .parse::<f64>()
        .map_err(|_| RangeError::invalid(spec, format!("'{}' is not a number", token)))
}

fn render_bounds(start: Option<f64>, end: Option<f64>, inside: bool) -> String {
    let prefix = if inside { "@" } else { "" };
    let start = start.map_or_else(|| "~".to_string(), |s| s.to_string());
    let end = end.map_or_else(String::new, |e| e.to_string());
    format!("{}{}:{}", prefix, start, end)
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alert_on_inside_range {
            write!(f, "@")?;
        }
        if self.start_infinite {
            write!(f, "~:")?;
        } else if self.start != 0.0 || self.end_infinite {
            write!(f, "{}:", self.start)?;
        }
        if !self.end_infinite {
            write!(f, "{}", self.end)?;
        }
        Ok(())
    }
}

impl FromStr for Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

/// A bare number `n` is the range `0:n`.
impl TryFrom<f64> for Range {
    type Error = RangeError;

    fn try_from(end: f64) -> Result<Self, Self::Error> {
        if end < 0.0 {
            return Err(RangeError::invalid_value(
                &end.to_string(),
                "negative upper bound needs an explicit start",
            ));
        }
        Range::new(Some(0.0), Some(end), false)
    }
}

/// Anything a threshold level can be built from.
pub trait IntoRange {
    fn into_range(self) -> Result<Range, RangeError>;
}

impl IntoRange for Range {
    fn into_range(self) -> Result<Range, RangeError> {
        Ok(self)
    }
}

impl IntoRange for &str {
    fn into_range(self) -> Result<Range, RangeError> {
        Range::parse(self)
    }
}

impl IntoRange for String {
    fn into_range(self) -> Result<Range, RangeError> {
        Range::parse(&self)
    }
}

impl IntoRange for f64 {
    fn into_range(self) -> Result<Range, RangeError> {
        Range::try_from(self)
    }
}

macro_rules! into_range_from_int {
    ($($ty:ty),*) => {
        $(
            impl IntoRange for $ty {
                fn into_range(self) -> Result<Range, RangeError> {
                    Range::try_from(self as f64)
                }
            }
        )*
    };
}

into_range_from_int!(i32, i64, u32, u64);

impl Serialize for Range {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(f64),
        }

        let parsed = match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Range::parse(&text),
            Repr::Number(n) => Range::try_from(n),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
