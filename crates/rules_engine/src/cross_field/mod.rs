//! Cross-field validation.
//!
//! Cross-field rules look at several fields of the same record. The mode is
//! selected by `configuration.type`:
//! - `conditional`: a condition on one field gates a check on another
//! - `comparison`: two fields compared directly (dates or numbers) or summed
//! - `dependency`: a trigger value on one field requires another to be filled
//! - `businessRule`: a named rule from a fixed catalogue
//! - no type: a legacy free-form condition expression
//!
//! Every mode fails open: a configuration missing one of its keys passes.

mod business;
mod comparison;
mod conditional;
mod dependency;
mod expression;
mod legacy;

pub use expression::{Expression, ExpressionError, Operand, Operator};

use crate::{CheckOutcome, PatternCache};
use rules_core::{CrossFieldConfig, CrossFieldMode, Record};

/// Validates predicates spanning several fields of a record.
#[derive(Debug)]
pub struct CrossFieldValidator;

impl CrossFieldValidator {
    /// Creates a new cross-field validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a record against a cross-field configuration.
    pub fn validate(
        &self,
        config: &CrossFieldConfig,
        record: &Record,
        patterns: &PatternCache,
    ) -> CheckOutcome {
        match config {
            CrossFieldConfig::Typed(CrossFieldMode::Conditional(c)) => {
                conditional::validate(c, record, patterns)
            }
            CrossFieldConfig::Typed(CrossFieldMode::Comparison(c)) => comparison::validate(c, record),
            CrossFieldConfig::Typed(CrossFieldMode::Dependency(c)) => dependency::validate(c, record),
            CrossFieldConfig::Typed(CrossFieldMode::BusinessRule(c)) => business::validate(c, record),
            CrossFieldConfig::Legacy(c) => legacy::validate(c, record),
        }
    }
}

impl Default for CrossFieldValidator {
    fn default() -> Self {
        Self::new()
    }
}
