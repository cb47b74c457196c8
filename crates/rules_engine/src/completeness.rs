//! Completeness validation.
//!
//! Checks run in a fixed order (required, then not-empty, then minimum length)
//! and the first failure wins. Unconfigured checks are skipped.

use crate::CheckOutcome;
use rules_core::{CompletenessConfig, DataValue};

/// Validates presence and length of values.
#[derive(Debug)]
pub struct CompletenessValidator;

impl CompletenessValidator {
    /// Creates a new completeness validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a value against a completeness configuration.
    pub fn validate(&self, config: &CompletenessConfig, value: Option<&DataValue>) -> CheckOutcome {
        let present = value.filter(|v| !v.is_null());

        if config.required && present.is_none() {
            return CheckOutcome::fail("Required field is missing");
        }

        if config.not_empty {
            let empty = present.is_none_or(|v| v.to_string().trim().is_empty());
            if empty {
                return CheckOutcome::fail("Field must not be empty");
            }
        }

        if let Some(min_length) = config.min_length {
            // Without `required`, a missing value skips the length check
            let Some(value) = present else {
                return CheckOutcome::pass();
            };

            let length = value.to_string().chars().count();
            if length < min_length {
                return CheckOutcome::fail(format!(
                    "Field length {} is less than minimum length {}",
                    length, min_length
                ));
            }
        }

        CheckOutcome::pass()
    }
}

impl Default for CompletenessValidator {
    fn default() -> Self {
        Self::new()
    }
}
