//! Field resolution for rule targets.
//!
//! A target pattern selects the record fields a rule applies to:
//! - `*` selects every field, in record order
//! - a pattern containing `*` is a case-insensitive glob over the whole name
//! - anything else is an exact, case-sensitive field name

use regex::{Regex, RegexBuilder};
use rules_core::Record;
use tracing::warn;

/// Compiled form of a target pattern.
#[derive(Debug, Clone)]
pub enum TargetMatcher {
    /// `*`
    All,
    /// Exact field name
    Exact(String),
    /// Anchored, case-insensitive glob
    Glob(Regex),
    /// Glob that could not be compiled; matches nothing
    Invalid,
}

impl TargetMatcher {
    /// Compiles a target pattern.
    pub fn new(pattern: &str) -> Self {
        if pattern == "*" {
            return TargetMatcher::All;
        }

        if !pattern.contains('*') {
            return TargetMatcher::Exact(pattern.to_string());
        }

        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        match RegexBuilder::new(&format!("^{}$", body))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => TargetMatcher::Glob(regex),
            Err(e) => {
                warn!(pattern, error = %e, "Target pattern could not be compiled");
                TargetMatcher::Invalid
            }
        }
    }

    /// Returns true if the field name is selected by this matcher.
    pub fn matches(&self, field: &str) -> bool {
        match self {
            TargetMatcher::All => true,
            TargetMatcher::Exact(name) => name == field,
            TargetMatcher::Glob(regex) => regex.is_match(field),
            TargetMatcher::Invalid => false,
        }
    }

    /// Returns the selected field names in record order.
    pub fn resolve<'r>(&self, record: &'r Record) -> Vec<&'r str> {
        match self {
            TargetMatcher::Exact(name) => record
                .get_key_value(name.as_str())
                .map(|(key, _)| vec![key.as_str()])
                .unwrap_or_default(),
            _ => record
                .keys()
                .map(String::as_str)
                .filter(|field| self.matches(field))
                .collect(),
        }
    }
}

/// Resolves a target pattern against a record.
///
/// No match yields an empty list.
pub fn resolve<'r>(pattern: &str, record: &'r Record) -> Vec<&'r str> {
    TargetMatcher::new(pattern).resolve(record)
}
