//! Parser for validation rule sets and records (JSON/YAML/TOML formats).
//!
//! This module reads rule sets into strongly-typed
//! [`RuleDefinition`](rules_core::RuleDefinition)s and records into
//! [`Record`](rules_core::Record)s. A rule set is either a bare list of rules
//! or a document with a `rules` list; TOML only supports the latter.
//!
//! # Example
//!
//! ```rust
//! use rules_parser::parse_rules_yaml;
//!
//! let yaml = r#"
//! rules:
//!   - id: age-range
//!     name: Age range
//!     ruleType: range
//!     target:
//!       field: age
//!     configuration:
//!       min: 0
//!       max: 150
//! "#;
//!
//! let rules = parse_rules_yaml(yaml).expect("Failed to parse rules");
//! assert_eq!(rules[0].id, "age-range");
//! ```

mod store;

pub use store::FileRuleStore;

use indexmap::IndexMap;
use rules_core::{DataValue, Record, RuleDefinition};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while parsing rule sets and records.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing, deserialization or serialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The document is well-formed but is not a rule set
    #[error("Invalid rule set: {0}")]
    InvalidRuleSet(String),

    /// The document is well-formed but is not a flat record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

impl FileFormat {
    /// Canonical name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Toml => "toml",
        }
    }
}

/// Detect the file format from a path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → `FileFormat::Json`
/// * `.yaml`, `.yml` → `FileFormat::Yaml`
/// * `.toml` → `FileFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(FileFormat::Json),
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a rule set from a JSON string.
///
/// # Example
///
/// ```rust
/// use rules_parser::parse_rules_json;
///
/// let json = r#"[
///   { "id": "email", "name": "Email", "ruleType": "format",
///     "target": { "field": "email" }, "configuration": { "dataType": "email" } }
/// ]"#;
///
/// let rules = parse_rules_json(json).unwrap();
/// assert_eq!(rules.len(), 1);
/// ```
pub fn parse_rules_json(content: &str) -> Result<Vec<RuleDefinition>> {
    let document: Value = serde_json::from_str(content)?;
    rules_from_value(document)
}

/// Parse a rule set from a YAML string.
pub fn parse_rules_yaml(content: &str) -> Result<Vec<RuleDefinition>> {
    let document: Value = serde_yaml_ng::from_str(content)?;
    rules_from_value(document)
}

/// Parse a rule set from a TOML string.
///
/// TOML documents list their rules as `[[rules]]` tables.
///
/// # Example
///
/// ```rust
/// use rules_parser::parse_rules_toml;
///
/// let toml = r#"
/// [[rules]]
/// id = "age-range"
/// name = "Age range"
/// ruleType = "range"
/// target = { field = "age" }
/// configuration = { min = 0, max = 150 }
/// "#;
///
/// let rules = parse_rules_toml(toml).unwrap();
/// assert_eq!(rules[0].rule_type(), "range");
/// ```
pub fn parse_rules_toml(content: &str) -> Result<Vec<RuleDefinition>> {
    let document: Value =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    rules_from_value(document)
}

/// Parse a rule set from a string in the given format.
pub fn parse_rules(content: &str, format: FileFormat) -> Result<Vec<RuleDefinition>> {
    match format {
        FileFormat::Json => parse_rules_json(content),
        FileFormat::Yaml => parse_rules_yaml(content),
        FileFormat::Toml => parse_rules_toml(content),
    }
}

/// Parse a rule set from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use rules_parser::parse_rules_file;
/// use std::path::Path;
///
/// let rules = parse_rules_file(Path::new("rules/customers.yml")).unwrap();
/// println!("Loaded {} rules", rules.len());
/// ```
pub fn parse_rules_file(path: &Path) -> Result<Vec<RuleDefinition>> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), format = format.as_str(), "Parsing rule file");
    parse_rules(&content, format)
}

/// Reads rules out of a parsed document: a list, or an object with `rules`.
fn rules_from_value(document: Value) -> Result<Vec<RuleDefinition>> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("rules") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ParserError::InvalidRuleSet(
                    "'rules' must be a list".to_string(),
                ));
            }
            None => {
                return Err(ParserError::InvalidRuleSet(
                    "expected a list of rules or a 'rules' key".to_string(),
                ));
            }
        },
        _ => {
            return Err(ParserError::InvalidRuleSet(
                "expected a list of rules or a 'rules' key".to_string(),
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let label = item
                .get("id")
                .and_then(Value::as_str)
                .map(|id| format!("rule '{}'", id))
                .unwrap_or_else(|| format!("rule #{}", index + 1));
            serde_json::from_value(item)
                .map_err(|e| ParserError::InvalidRuleSet(format!("{}: {}", label, e)))
        })
        .collect()
}

/// Parse a record from a JSON object.
///
/// # Example
///
/// ```rust
/// use rules_parser::parse_record_json;
/// use rules_core::DataValue;
///
/// let record = parse_record_json(r#"{ "name": "Ada", "age": 36 }"#).unwrap();
/// assert_eq!(record.get("age"), Some(&DataValue::Int(36)));
/// ```
pub fn parse_record_json(content: &str) -> Result<Record> {
    let fields: IndexMap<String, Value> = serde_json::from_str(content)?;
    record_from_fields(fields)
}

/// Parse a record from a YAML mapping.
pub fn parse_record_yaml(content: &str) -> Result<Record> {
    let fields: IndexMap<String, Value> = serde_yaml_ng::from_str(content)?;
    record_from_fields(fields)
}

/// Parse a record from a TOML table.
///
/// Native TOML dates and times become strings in their TOML spelling.
pub fn parse_record_toml(content: &str) -> Result<Record> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    let fields = table
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
                other => serde_json::to_value(other)?,
            };
            Ok((name, value))
        })
        .collect::<Result<IndexMap<String, Value>>>()?;
    record_from_fields(fields)
}

/// Parse a record from a string in the given format.
pub fn parse_record(content: &str, format: FileFormat) -> Result<Record> {
    match format {
        FileFormat::Json => parse_record_json(content),
        FileFormat::Yaml => parse_record_yaml(content),
        FileFormat::Toml => parse_record_toml(content),
    }
}

/// Parse a record from a file with automatic format detection.
pub fn parse_record_file(path: &Path) -> Result<Record> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), format = format.as_str(), "Parsing record file");
    parse_record(&content, format)
}

/// Converts parsed fields to scalar values, keeping document order.
fn record_from_fields(fields: IndexMap<String, Value>) -> Result<Record> {
    fields
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Value::Array(_) | Value::Object(_) => {
                    return Err(ParserError::InvalidRecord(format!(
                        "field '{}' holds a nested value",
                        name
                    )));
                }
                Value::Null => DataValue::Null,
                Value::Bool(b) => DataValue::Bool(b),
                Value::String(s) => DataValue::String(s),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => DataValue::Int(i),
                    None => DataValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
            };
            Ok((name, value))
        })
        .collect()
}

#[derive(Serialize)]
struct RuleDocument<'a> {
    rules: &'a [RuleDefinition],
}

/// Serialize a rule set as a `rules` document in the given format.
pub fn serialize_rules(rules: &[RuleDefinition], format: FileFormat) -> Result<String> {
    let document = RuleDocument { rules };
    match format {
        FileFormat::Json => Ok(serde_json::to_string_pretty(&document)?),
        FileFormat::Yaml => Ok(serde_yaml_ng::to_string(&document)?),
        FileFormat::Toml => {
            toml::to_string(&document).map_err(|e| ParserError::TomlError(e.to_string()))
        }
    }
}
