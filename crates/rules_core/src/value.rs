//! Record representation for validation.
//!
//! A record is a flat, insertion-ordered mapping of field names to scalar
//! values. Nested values are not part of the model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value in a record.
///
/// Serialized untagged so that JSON, YAML and TOML scalars map directly onto
/// the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns true for integer and floating point values.
    pub fn is_number(&self) -> bool {
        matches!(self, DataValue::Int(_) | DataValue::Float(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) => "int64",
            DataValue::Float(_) => "float64",
            DataValue::String(_) => "string",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Formats numbers the way record values are written in messages: integral
/// floats without a fractional part, infinities spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        n.to_string()
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => f.write_str("null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::Float(n) => f.write_str(&format_number(*n)),
            DataValue::String(s) => f.write_str(s),
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// A single flat record.
///
/// Field order is the insertion order, which is the order wildcard targets
/// visit fields in.
pub type Record = IndexMap<String, DataValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_value_types() {
        assert_eq!(DataValue::Null.type_name(), "null");
        assert_eq!(DataValue::String("test".into()).type_name(), "string");
        assert_eq!(DataValue::Int(42).type_name(), "int64");
        assert_eq!(DataValue::Float(3.5).type_name(), "float64");
        assert_eq!(DataValue::Bool(true).type_name(), "boolean");
    }

    #[test]
    fn test_data_value_conversions() {
        let val = DataValue::String("hello".into());
        assert_eq!(val.as_str(), Some("hello"));
        assert_eq!(val.as_int(), None);

        let val = DataValue::Int(42);
        assert_eq!(val.as_int(), Some(42));
        assert_eq!(val.as_float(), Some(42.0));
        assert_eq!(val.as_str(), None);

        assert_eq!(DataValue::from(None::<&str>), DataValue::Null);
        assert_eq!(DataValue::from(Some("x")), DataValue::String("x".into()));
    }

    #[test]
    fn test_display_matches_message_format() {
        assert_eq!(DataValue::Float(150.0).to_string(), "150");
        assert_eq!(DataValue::Float(1.5).to_string(), "1.5");
        assert_eq!(DataValue::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(DataValue::Null.to_string(), "null");
        assert_eq!(DataValue::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_untagged_deserialization() {
        let record: Record = serde_json::from_str(
            r#"{"name": "Ada", "age": 36, "score": 9.5, "active": true, "nickname": null}"#,
        )
        .unwrap();

        assert_eq!(record["name"], DataValue::String("Ada".into()));
        assert_eq!(record["age"], DataValue::Int(36));
        assert_eq!(record["score"], DataValue::Float(9.5));
        assert_eq!(record["active"], DataValue::Bool(true));
        assert_eq!(record["nickname"], DataValue::Null);
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let record: Record = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }
}
