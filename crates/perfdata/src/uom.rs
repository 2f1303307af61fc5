//! Units of measure attached to performance values.

use crate::error::PerformanceError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Write};
use tracing::warn;

/// Unit of measure of a performance value.
///
/// Unrecognized units are carried through as [`Uom::Custom`] unless strict
/// parsing is requested. A unit only ever renders the characters a
/// performance token allows there: ASCII letters, `%` and `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Uom {
    /// No unit; a plain number.
    #[default]
    None,
    Seconds,
    Milliseconds,
    Microseconds,
    Percent,
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
    /// A continuous counter such as bytes transmitted on an interface.
    Counter,
    Custom(String),
}

impl Uom {
    fn recognized(token: &str) -> Option<Uom> {
        let uom = match token {
            "" => Uom::None,
            "s" => Uom::Seconds,
            "ms" => Uom::Milliseconds,
            "us" => Uom::Microseconds,
            "%" => Uom::Percent,
            "B" => Uom::Bytes,
            "KB" => Uom::Kilobytes,
            "MB" => Uom::Megabytes,
            "GB" => Uom::Gigabytes,
            "TB" => Uom::Terabytes,
            "c" => Uom::Counter,
            _ => return None,
        };
        Some(uom)
    }

    /// Parse a unit token, keeping unknown units as [`Uom::Custom`].
    /// Characters not allowed in a unit are dropped.
    pub fn parse(token: &str) -> Uom {
        if let Some(uom) = Self::recognized(token) {
            return uom;
        }
        let unit: String = token.chars().filter(|&c| is_unit_char(c)).collect();
        if unit.len() != token.len() {
            warn!(token, unit = %unit, "dropped characters not allowed in a unit");
        }
        Self::recognized(&unit).unwrap_or(Uom::Custom(unit))
    }

    /// Parse a unit token, rejecting anything that is not a standard unit.
    pub fn parse_strict(token: &str) -> Result<Uom, PerformanceError> {
        Self::recognized(token).ok_or_else(|| PerformanceError::UnknownUom(token.to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Uom::Custom(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Uom::None => "",
            Uom::Seconds => "s",
            Uom::Milliseconds => "ms",
            Uom::Microseconds => "us",
            Uom::Percent => "%",
            Uom::Bytes => "B",
            Uom::Kilobytes => "KB",
            Uom::Megabytes => "MB",
            Uom::Gigabytes => "GB",
            Uom::Terabytes => "TB",
            Uom::Counter => "c",
            Uom::Custom(token) => token,
        }
    }
}

fn is_unit_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '%' || c == '/'
}

impl From<&str> for Uom {
    fn from(token: &str) -> Self {
        Uom::parse(token)
    }
}

impl fmt::Display for Uom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uom::Custom(token) => token
                .chars()
                .filter(|&c| is_unit_char(c))
                .try_for_each(|c| f.write_char(c)),
            uom => f.write_str(uom.as_str()),
        }
    }
}

impl Serialize for Uom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Uom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        if !token.chars().all(is_unit_char) {
            return Err(de::Error::custom(PerformanceError::UnknownUom(token)));
        }
        Ok(Uom::parse(&token))
    }
}
