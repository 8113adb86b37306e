//! SQL literal encoding
//!
//! Every [`ColumnValue`] is turned into text that a SQL literal grammar parses
//! back into the same value: keywords for NULL and booleans, typed string
//! literals for temporal values, bare numbers for numeric kinds and quoted
//! strings for everything else.

use crate::value::ColumnValue;

const QUOTE: char = '\'';
const ESCAPED_QUOTE: &str = "''";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Encode a value as a SQL literal
pub fn encode(value: &ColumnValue) -> String {
    match value {
        ColumnValue::Null => "NULL".to_string(),
        ColumnValue::Boolean(true) => "TRUE".to_string(),
        ColumnValue::Boolean(false) => "FALSE".to_string(),
        ColumnValue::Timestamp(ts) => typed("TIMESTAMP", &ts.format(TIMESTAMP_FORMAT).to_string()),
        ColumnValue::Date(date) => typed("DATE", &date.format(DATE_FORMAT).to_string()),
        ColumnValue::Time(time) => typed("TIME", &time.format(TIME_FORMAT).to_string()),
        ColumnValue::Decimal(d) => d.to_string(),
        ColumnValue::Short(n) => n.to_string(),
        ColumnValue::Int(n) => n.to_string(),
        ColumnValue::Long(n) => n.to_string(),
        ColumnValue::Float(f) => float(f64::from(*f), f.is_finite(), || f.to_string()),
        ColumnValue::Double(f) => float(*f, f.is_finite(), || f.to_string()),
        ColumnValue::Text(s) => quote(s),
        ColumnValue::Blob(bytes) => format!("X{}", quote(&hex::encode_upper(bytes))),
    }
}

/// Wrap `s` in single quotes, doubling every embedded quote
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push(QUOTE);
    for ch in s.chars() {
        if ch == QUOTE {
            quoted.push_str(ESCAPED_QUOTE);
        } else {
            quoted.push(ch);
        }
    }
    quoted.push(QUOTE);
    quoted
}

fn typed(keyword: &str, body: &str) -> String {
    format!("{} {}", keyword, quote(body))
}

// NaN and the infinities have no numeric literal form.
fn float(value: f64, finite: bool, plain: impl FnOnce() -> String) -> String {
    if finite {
        plain()
    } else if value.is_nan() {
        quote("NaN")
    } else if value.is_sign_negative() {
        quote("-Infinity")
    } else {
        quote("Infinity")
    }
}
