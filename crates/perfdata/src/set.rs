//! Ordered collections of performance data.

use crate::datum::PerformanceDatum;
use crate::error::PerformanceError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// A quoted label keeps its whitespace; everything else splits on whitespace.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^']*'\S*|\S+").expect("token pattern is a valid regex"));

/// A token skipped by [`PerformanceSet::parse_line_with_rejects`].
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedToken {
    pub token: String,
    pub error: PerformanceError,
}

/// Performance data in output order. Labels are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceSet {
    data: Vec<PerformanceDatum>,
}

impl PerformanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a datum.
    pub fn add(&mut self, datum: PerformanceDatum) {
        self.data.push(datum);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PerformanceDatum> {
        self.data.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PerformanceDatum> {
        self.data.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(PerformanceDatum::label)
    }

    /// Parse the performance part of a plugin output line.
    ///
    /// Malformed tokens are logged and skipped.
    pub fn parse_line(line: &str) -> Self {
        let (set, rejected) = Self::parse_line_with_rejects(line);
        for reject in &rejected {
            warn!(token = %reject.token, error = %reject.error, "skipping malformed performance data");
        }
        set
    }

    /// Parse the performance part of a plugin output line, returning the
    /// tokens that could not be parsed alongside the data that could.
    pub fn parse_line_with_rejects(line: &str) -> (Self, Vec<RejectedToken>) {
        let mut set = Self::new();
        let mut rejected = Vec::new();

        for token in TOKEN_RE.find_iter(line).map(|m| m.as_str()) {
            match PerformanceDatum::parse(token) {
                Ok(datum) => set.add(datum),
                Err(error) => rejected.push(RejectedToken {
                    token: token.to_string(),
                    error,
                }),
            }
        }

        (set, rejected)
    }
}

impl fmt::Display for PerformanceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, datum) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", datum)?;
        }
        Ok(())
    }
}

impl FromIterator<PerformanceDatum> for PerformanceSet {
    fn from_iter<I: IntoIterator<Item = PerformanceDatum>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl Extend<PerformanceDatum> for PerformanceSet {
    fn extend<I: IntoIterator<Item = PerformanceDatum>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl IntoIterator for PerformanceSet {
    type Item = PerformanceDatum;
    type IntoIter = std::vec::IntoIter<PerformanceDatum>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a PerformanceSet {
    type Item = &'a PerformanceDatum;
    type IntoIter = std::slice::Iter<'a, PerformanceDatum>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
