//! Mapping of SQLite values onto column values
//!
//! SQLite stores every value in one of five storage classes. The column's
//! declared type, when there is one, refines the mapping: an INTEGER in a
//! `BOOLEAN` column is a boolean, TEXT in a `DATE` column is a date, and so on.
//! Text that does not parse as its declared type stays text.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::ValueRef;
use sqlclient_core::{ColumnValue, Decimal};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// What a declared column type asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Declared {
    Boolean,
    Short,
    Timestamp,
    Date,
    Time,
    Decimal,
    Other,
}

impl Declared {
    pub(crate) fn from_decl(decl: Option<&str>) -> Self {
        let Some(decl) = decl else {
            return Self::Other;
        };
        let decl = decl.to_ascii_uppercase();
        if decl.contains("BOOL") {
            Self::Boolean
        } else if decl.contains("SMALLINT") || decl.contains("TINYINT") || decl == "INT2" {
            Self::Short
        } else if decl.contains("TIMESTAMP") || decl.contains("DATETIME") {
            Self::Timestamp
        } else if decl.contains("DATE") {
            Self::Date
        } else if decl.contains("TIME") {
            Self::Time
        } else if decl.contains("DECIMAL") || decl.contains("NUMERIC") {
            Self::Decimal
        } else {
            Self::Other
        }
    }
}

pub(crate) fn to_column_value(value: ValueRef<'_>, declared: Declared) -> ColumnValue {
    match value {
        ValueRef::Null => ColumnValue::Null,
        ValueRef::Integer(i) => integer(i, declared),
        ValueRef::Real(f) => ColumnValue::Double(f),
        ValueRef::Text(s) => text(&String::from_utf8_lossy(s), declared),
        ValueRef::Blob(b) => ColumnValue::Blob(b.to_vec()),
    }
}

fn integer(i: i64, declared: Declared) -> ColumnValue {
    match declared {
        Declared::Boolean => return ColumnValue::Boolean(i != 0),
        Declared::Short => {
            if let Ok(short) = i16::try_from(i) {
                return ColumnValue::Short(short);
            }
        }
        Declared::Decimal => {
            if let Ok(decimal) = i.to_string().parse::<Decimal>() {
                return ColumnValue::Decimal(decimal);
            }
        }
        _ => {}
    }
    match i32::try_from(i) {
        Ok(int) => ColumnValue::Int(int),
        Err(_) => ColumnValue::Long(i),
    }
}

fn text(s: &str, declared: Declared) -> ColumnValue {
    let parsed = match declared {
        Declared::Timestamp => TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(ColumnValue::Timestamp),
        Declared::Date => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .ok()
            .map(ColumnValue::Date),
        Declared::Time => TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
            .map(ColumnValue::Time),
        Declared::Decimal => s.parse::<Decimal>().ok().map(ColumnValue::Decimal),
        Declared::Boolean => match s.to_ascii_lowercase().as_str() {
            "true" => Some(ColumnValue::Boolean(true)),
            "false" => Some(ColumnValue::Boolean(false)),
            _ => None,
        },
        Declared::Short | Declared::Other => None,
    };
    parsed.unwrap_or_else(|| ColumnValue::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(value: ValueRef<'_>, decl: Option<&str>) -> ColumnValue {
        to_column_value(value, Declared::from_decl(decl))
    }

    #[test]
    fn test_declared_type_classification() {
        assert_eq!(Declared::from_decl(None), Declared::Other);
        assert_eq!(Declared::from_decl(Some("boolean")), Declared::Boolean);
        assert_eq!(Declared::from_decl(Some("SMALLINT")), Declared::Short);
        assert_eq!(Declared::from_decl(Some("DATETIME")), Declared::Timestamp);
        assert_eq!(Declared::from_decl(Some("timestamp")), Declared::Timestamp);
        assert_eq!(Declared::from_decl(Some("DATE")), Declared::Date);
        assert_eq!(Declared::from_decl(Some("TIME")), Declared::Time);
        assert_eq!(Declared::from_decl(Some("DECIMAL(10,2)")), Declared::Decimal);
        assert_eq!(Declared::from_decl(Some("INTEGER")), Declared::Other);
        assert_eq!(Declared::from_decl(Some("VARCHAR(20)")), Declared::Other);
    }

    #[test]
    fn test_null_and_blob() {
        assert_eq!(map(ValueRef::Null, Some("INTEGER")), ColumnValue::Null);
        assert_eq!(
            map(ValueRef::Blob(&[0xde, 0xad]), None),
            ColumnValue::Blob(vec![0xde, 0xad])
        );
    }

    #[test]
    fn test_integers_by_width_and_declaration() {
        assert_eq!(map(ValueRef::Integer(42), None), ColumnValue::Int(42));
        assert_eq!(
            map(ValueRef::Integer(i64::from(i32::MAX) + 1), None),
            ColumnValue::Long(i64::from(i32::MAX) + 1)
        );
        assert_eq!(map(ValueRef::Integer(1), Some("BOOLEAN")), ColumnValue::Boolean(true));
        assert_eq!(map(ValueRef::Integer(0), Some("BOOL")), ColumnValue::Boolean(false));
        assert_eq!(map(ValueRef::Integer(7), Some("SMALLINT")), ColumnValue::Short(7));
        assert_eq!(map(ValueRef::Integer(70_000), Some("SMALLINT")), ColumnValue::Int(70_000));
        assert_eq!(
            map(ValueRef::Integer(12), Some("NUMERIC")),
            ColumnValue::Decimal("12".parse().unwrap())
        );
    }

    #[test]
    fn test_real_is_double() {
        assert_eq!(map(ValueRef::Real(1.5), Some("NUMERIC")), ColumnValue::Double(1.5));
    }

    #[test]
    fn test_text_parsed_by_declaration() {
        assert_eq!(
            map(ValueRef::Text(b"2024-01-15 10:30:00"), Some("TIMESTAMP")),
            ColumnValue::Timestamp(
                NaiveDate::from_ymd_opt(2024, 1, 15)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap()
            )
        );
        assert_eq!(
            map(ValueRef::Text(b"2024-01-15"), Some("DATE")),
            ColumnValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(
            map(ValueRef::Text(b"23:59:01"), Some("TIME")),
            ColumnValue::Time(NaiveTime::from_hms_opt(23, 59, 1).unwrap())
        );
        assert_eq!(
            map(ValueRef::Text(b"19.99"), Some("DECIMAL(10,2)")),
            ColumnValue::Decimal("19.99".parse().unwrap())
        );
        assert_eq!(map(ValueRef::Text(b"TRUE"), Some("BOOLEAN")), ColumnValue::Boolean(true));
    }

    #[test]
    fn test_unparseable_text_stays_text() {
        assert_eq!(
            map(ValueRef::Text(b"yesterday"), Some("DATE")),
            ColumnValue::Text("yesterday".into())
        );
        assert_eq!(
            map(ValueRef::Text(b"12,5"), Some("DECIMAL")),
            ColumnValue::Text("12,5".into())
        );
        assert_eq!(map(ValueRef::Text(b"hello"), None), ColumnValue::Text("hello".into()));
    }
}
