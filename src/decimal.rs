//! Decimal literals for numeric schema keywords
//!
//! Bounds such as `maximum` or `multipleOf` must survive a round trip through
//! the model without binary floating point rounding, so they are kept as the
//! validated textual literal rather than an `f64`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

static DECIMAL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").expect("static regex is valid")
});

/// An exact decimal number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal(String);

impl Decimal {
    /// Parse a decimal literal (JSON number grammar)
    pub fn parse(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        if DECIMAL_LITERAL.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ModelError::InvalidDecimal(literal.to_string()))
        }
    }

    /// The literal text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lossy conversion for consumers that only need an approximation
    pub fn to_f64(&self) -> f64 {
        self.0.parse().unwrap_or(f64::NAN)
    }

    /// Convert into a JSON number carrying the literal digits unchanged
    pub fn to_json(&self) -> serde_json::Value {
        match serde_json::Number::from_str(&self.0) {
            Ok(n) => serde_json::Value::Number(n),
            Err(_) => serde_json::Value::String(self.0.clone()),
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Decimal {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Decimal {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Decimal> for String {
    fn from(d: Decimal) -> Self {
        d.0
    }
}

impl From<i64> for Decimal {
    fn from(i: i64) -> Self {
        Self(i.to_string())
    }
}

impl From<u64> for Decimal {
    fn from(i: u64) -> Self {
        Self(i.to_string())
    }
}

impl From<u32> for Decimal {
    fn from(i: u32) -> Self {
        Self(i.to_string())
    }
}

impl From<i32> for Decimal {
    fn from(i: i32) -> Self {
        Self(i.to_string())
    }
}
