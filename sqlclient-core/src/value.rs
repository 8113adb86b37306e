//! Typed column values

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// One cell of a result row
///
/// Drivers map their native types onto this closed set of kinds. Anything
/// without a dedicated kind is carried as [`ColumnValue::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Boolean(bool),
    /// Exact decimal number
    Decimal(Decimal),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Date and time of day without a zone
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    /// Time of day
    Time(NaiveTime),
    /// Generic fallback, rendered as a quoted string
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i16> for ColumnValue {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for ColumnValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// An exact decimal number kept in its base-10 text form
///
/// Only `[-]digits[.digits]` is accepted, so the text is always a valid
/// unquoted SQL numeric literal. A leading `+` is dropped on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

/// Returned when text is not a plain decimal number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid decimal literal: {0:?}")]
pub struct ParseDecimalError(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDecimalError(s.to_string());

        let (sign, unsigned) = match s.as_bytes().first() {
            Some(b'-') => ("-", &s[1..]),
            Some(b'+') => ("", &s[1..]),
            _ => ("", s),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (unsigned, None),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) {
            return Err(invalid());
        }
        if let Some(frac) = frac_part {
            if frac.is_empty() || !all_digits(frac) {
                return Err(invalid());
            }
        }

        Ok(Self(format!("{}{}", sign, unsigned)))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
