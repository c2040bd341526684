//! Amount type for handling monetary values with optional currency symbols.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may or may not include a currency symbol and commas.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a monetary amount.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization.
/// Values are persisted as plain decimal strings (e.g. `"500"` or `"12.50"`),
/// but deserialization also accepts bare JSON numbers so that documents written
/// by other tools import cleanly.
///
/// Parsing from a string tolerates a leading currency symbol and thousands
/// separators:
///
/// ```
/// # use moneybook::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,250.00").unwrap();
/// assert_eq!(amount.to_string(), "1250.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.value().is_sign_negative() && !self.is_zero()
    }

    /// Formats the amount for display with a currency symbol, thousands
    /// separators and two decimal places, e.g. `$1,250.00`.
    ///
    /// Display formatting only; the stored value is never rounded.
    pub fn formatted(&self, symbol: &str) -> String {
        let (sign, num) = if self.is_negative() {
            ("-", self.value().abs())
        } else {
            ("", self.value())
        };
        format!(
            "{sign}{symbol}{}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Handle empty string
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Remove a currency symbol if present, keeping the sign in front
        let (sign, rest) = match trimmed.strip_prefix('-') {
            Some(after_minus) => ("-", after_minus),
            None => ("", trimmed),
        };
        let rest = match rest.chars().next() {
            Some(c) if !c.is_ascii_digit() && c != '.' => &rest[c.len_utf8()..],
            _ => rest,
        };

        // Remove commas (thousand separators)
        let without_commas = rest.replace(',', "");

        // Parse the decimal value
        let value =
            Decimal::from_str(&format!("{sign}{without_commas}")).map_err(AmountError)?;
        Ok(Amount { value })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a plain decimal string
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => {
                Amount::from_str(&s).map_err(serde::de::Error::custom)
            }
            serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
                .map(Amount::new)
                .map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "expected a string or number for an amount, got {other}"
            ))),
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
