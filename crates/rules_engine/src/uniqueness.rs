//! Uniqueness validation.
//!
//! Uniqueness is evaluated within the record being validated: a value fails
//! when another field of the same record holds an equal value. The configured
//! scope is accepted but does not widen the check to other records.

use crate::CheckOutcome;
use crate::coercion::strict_eq;
use rules_core::{DataValue, Record, UniquenessConfig};

/// Validates that a value occurs only once in its record.
#[derive(Debug)]
pub struct UniquenessValidator;

impl UniquenessValidator {
    /// Creates a new uniqueness validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a value against the other values of its record.
    pub fn validate(
        &self,
        _config: &UniquenessConfig,
        value: Option<&DataValue>,
        record: &Record,
    ) -> CheckOutcome {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return CheckOutcome::pass();
        };

        let occurrences = record
            .values()
            .filter(|other| strict_eq(Some(*other), Some(value)))
            .count();

        CheckOutcome::check(occurrences <= 1, || {
            format!("Value '{}' is not unique within the dataset", value)
        })
    }
}

impl Default for UniquenessValidator {
    fn default() -> Self {
        Self::new()
    }
}
