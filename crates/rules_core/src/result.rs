//! Validation result and report types.
//!
//! The engine produces one [`ValidationResult`] per (rule, matched field)
//! pair. [`ValidationReport`] groups a result list into errors and warnings
//! by severity for callers that want a single verdict.

use crate::DataValue;
use serde::{Deserialize, Serialize};

/// Outcome of applying one rule to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Identifier of the rule that produced this result
    pub rule_id: String,

    /// Name of the rule that produced this result
    pub rule_name: String,

    /// Field the rule was applied to
    pub field: String,

    /// Field value at validation time; `None` when the field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DataValue>,

    /// Severity copied from the rule
    pub severity: String,

    /// Whether the check passed
    pub passed: bool,

    /// Failure explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    /// Returns true when this result fails with `error` severity.
    pub fn is_error(&self) -> bool {
        !self.passed && self.severity.eq_ignore_ascii_case("error")
    }

    /// One-line description used in reports.
    pub fn describe(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.rule_id,
            self.field,
            self.message.as_deref().unwrap_or("validation failed")
        )
    }
}

/// Report of validation results.
///
/// Contains the full result list along with failures split by severity and
/// execution statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether no error-severity result failed
    pub passed: bool,

    /// Failures with `error` severity
    pub errors: Vec<String>,

    /// Failures with any other severity
    pub warnings: Vec<String>,

    /// Every result in rule order, then field-match order
    pub results: Vec<ValidationResult>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    /// Number of enabled rules evaluated
    pub rules_evaluated: usize,

    /// Number of fields in the validated record
    pub fields_checked: usize,

    /// Number of failed results
    pub results_failed: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Builds a report from a result list.
    ///
    /// `stats.results_failed` is derived from the results.
    pub fn from_results(results: Vec<ValidationResult>, mut stats: ValidationStats) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for result in results.iter().filter(|r| !r.passed) {
            if result.is_error() {
                errors.push(result.describe());
            } else {
                warnings.push(result.describe());
            }
        }

        stats.results_failed = errors.len() + warnings.len();

        Self {
            passed: errors.is_empty(),
            errors,
            warnings,
            results,
            stats,
        }
    }

    /// Number of results that passed.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }
}
