//! Type coercion shared by the validators.
//!
//! Rules compare values loosely: numeric strings compare as numbers, date
//! strings compare as instants, and absent fields behave differently from
//! explicit nulls. Every validator goes through these helpers so the same
//! value coerces the same way in format, range and cross-field checks.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rules_core::{DataValue, format_number};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Converts a string to a number.
///
/// Blank strings are zero, `Infinity` is spelled out, `0x`/`0o`/`0b` prefixes
/// select a radix, and anything else that is not a decimal literal is NaN.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust's float grammar also takes "inf" and "nan"
    if text
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Converts a field value to a number. Absent fields are NaN, nulls are zero.
pub fn to_number(value: Option<&DataValue>) -> f64 {
    match value {
        None => f64::NAN,
        Some(DataValue::Null) => 0.0,
        Some(DataValue::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(DataValue::Int(i)) => *i as f64,
        Some(DataValue::Float(f)) => *f,
        Some(DataValue::String(s)) => parse_number(s),
    }
}

/// Returns the value as a number when it is present, not null, and numeric.
pub fn numeric(value: Option<&DataValue>) -> Option<f64> {
    match value {
        None | Some(DataValue::Null) => None,
        other => Some(to_number(other)).filter(|n| !n.is_nan()),
    }
}

/// Parses a date or date-time string.
///
/// Supports:
/// - RFC 3339 / ISO 8601 (e.g., "2024-01-15T10:30:00Z")
/// - RFC 2822 (e.g., "Mon, 15 Jan 2024 10:30:00 +0000")
/// - Date only (e.g., "2024-01-15", "2024/01/15", "01/15/2024")
/// - Date and time without offset (e.g., "2024-01-15 10:30:00"), read as UTC
///
/// Bare digit strings are not dates.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() || text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(text, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    })
}

/// Returns true only for strings that parse as a calendar date or date-time.
pub fn is_date_like(value: Option<&DataValue>) -> bool {
    match value {
        Some(DataValue::String(s)) => parse_date(s).is_some(),
        _ => false,
    }
}

/// Converts a value to epoch milliseconds.
///
/// Date strings are parsed; finite numbers are taken as epoch milliseconds.
pub fn to_timestamp_millis(value: Option<&DataValue>) -> Option<f64> {
    match value {
        Some(DataValue::String(s)) => parse_date(s).map(|dt| dt.timestamp_millis() as f64),
        Some(DataValue::Int(i)) => Some(*i as f64),
        Some(DataValue::Float(f)) if f.is_finite() => Some(*f),
        _ => None,
    }
}

/// Loose equality.
///
/// Null and absent only equal each other, strings compare exactly, and every
/// other mix compares numerically.
pub fn loose_eq(a: Option<&DataValue>, b: Option<&DataValue>) -> bool {
    let nullish = |v: Option<&DataValue>| matches!(v, None | Some(DataValue::Null));

    match (a, b) {
        _ if nullish(a) || nullish(b) => nullish(a) && nullish(b),
        (Some(DataValue::String(x)), Some(DataValue::String(y))) => x == y,
        (Some(DataValue::Bool(x)), Some(DataValue::Bool(y))) => x == y,
        (Some(DataValue::Int(x)), Some(DataValue::Int(y))) => x == y,
        _ => to_number(a) == to_number(b),
    }
}

/// Strict equality: same kind of value and equal. Integers and floats are
/// both numbers; NaN equals nothing.
pub fn strict_eq(a: Option<&DataValue>, b: Option<&DataValue>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(DataValue::Null), Some(DataValue::Null)) => true,
        (Some(DataValue::Bool(x)), Some(DataValue::Bool(y))) => x == y,
        (Some(DataValue::String(x)), Some(DataValue::String(y))) => x == y,
        (Some(DataValue::Int(x)), Some(DataValue::Int(y))) => x == y,
        (Some(x), Some(y)) if x.is_number() && y.is_number() => x.as_float() == y.as_float(),
        _ => false,
    }
}

/// Truthiness: absent, null, `false`, zero, NaN and `""` are false.
pub fn is_truthy(value: Option<&DataValue>) -> bool {
    match value {
        None | Some(DataValue::Null) => false,
        Some(DataValue::Bool(b)) => *b,
        Some(DataValue::Int(i)) => *i != 0,
        Some(DataValue::Float(f)) => *f != 0.0 && !f.is_nan(),
        Some(DataValue::String(s)) => !s.is_empty(),
    }
}

/// Absent, null, or the empty string.
pub fn is_blank(value: Option<&DataValue>) -> bool {
    match value {
        None | Some(DataValue::Null) => true,
        Some(DataValue::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Stringifies a possibly absent value for messages and string operators.
pub fn display(value: Option<&DataValue>) -> String {
    value.map_or_else(|| "undefined".to_string(), ToString::to_string)
}

/// Formats a number for messages.
pub fn display_number(n: f64) -> String {
    format_number(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(text: &str) -> DataValue {
        DataValue::String(text.to_string())
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("  -3.5 "), -3.5);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("0x1F"), 31.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("12px").is_nan());
    }

    #[test]
    fn test_to_number() {
        assert!(to_number(None).is_nan());
        assert_eq!(to_number(Some(&DataValue::Null)), 0.0);
        assert_eq!(to_number(Some(&DataValue::Bool(true))), 1.0);
        assert_eq!(to_number(Some(&DataValue::Int(7))), 7.0);
        assert_eq!(to_number(Some(&s("7.25"))), 7.25);
        assert_eq!(numeric(Some(&DataValue::Null)), None);
        assert_eq!(numeric(Some(&s("x"))), None);
        assert_eq!(numeric(Some(&s("18"))), Some(18.0));
    }

    #[test]
    fn test_date_detection() {
        assert!(is_date_like(Some(&s("2023-01-01"))));
        assert!(is_date_like(Some(&s("2023-01-01T10:00:00Z"))));
        assert!(is_date_like(Some(&s("2023-01-01 10:00:00"))));
        assert!(is_date_like(Some(&s("12/31/2023"))));
        assert!(!is_date_like(Some(&s("2023-13-01"))));
        assert!(!is_date_like(Some(&s("hello"))));
        assert!(!is_date_like(Some(&s("2023"))));
        assert!(!is_date_like(Some(&DataValue::Int(1_700_000_000_000))));
        assert!(!is_date_like(None));
    }

    #[test]
    fn test_date_ordering() {
        let start = to_timestamp_millis(Some(&s("2023-01-01"))).unwrap();
        let end = to_timestamp_millis(Some(&s("2023-12-31"))).unwrap();
        assert!(start < end);
        assert_eq!(to_timestamp_millis(Some(&DataValue::Int(5))), Some(5.0));
        assert_eq!(to_timestamp_millis(Some(&DataValue::Bool(true))), None);
    }

    #[test]
    fn test_loose_equality() {
        assert!(loose_eq(Some(&s("18")), Some(&DataValue::Int(18))));
        assert!(loose_eq(Some(&DataValue::Bool(true)), Some(&DataValue::Int(1))));
        assert!(loose_eq(None, Some(&DataValue::Null)));
        assert!(!loose_eq(Some(&DataValue::Null), Some(&DataValue::Int(0))));
        assert!(!loose_eq(Some(&s("yes")), Some(&s("Yes"))));
        assert!(!loose_eq(Some(&s("abc")), Some(&DataValue::Int(0))));
    }

    #[test]
    fn test_strict_equality() {
        assert!(strict_eq(Some(&DataValue::Int(2)), Some(&DataValue::Float(2.0))));
        assert!(!strict_eq(Some(&s("2")), Some(&DataValue::Int(2))));
        assert!(!strict_eq(
            Some(&DataValue::Float(f64::NAN)),
            Some(&DataValue::Float(f64::NAN))
        ));
    }

    #[test]
    fn test_truthiness_and_blankness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&s(""))));
        assert!(!is_truthy(Some(&DataValue::Int(0))));
        assert!(is_truthy(Some(&s("false"))));
        assert!(is_truthy(Some(&DataValue::Bool(true))));

        assert!(is_blank(None));
        assert!(is_blank(Some(&s(""))));
        assert!(!is_blank(Some(&s(" "))));
        assert!(!is_blank(Some(&DataValue::Bool(false))));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(None), "undefined");
        assert_eq!(display(Some(&DataValue::Float(2.0))), "2");
        assert_eq!(display_number(0.5), "0.5");
    }
}
