//! Rule dispatch.
//!
//! Routes a (rule, field) pair to the validator for the rule's kind.

use crate::{
    CheckOutcome, CompletenessValidator, CrossFieldValidator, CustomValidator, FormatValidator,
    PatternCache, RangeValidator, UniquenessValidator,
};
use rules_core::{Record, RuleConfig, RuleDefinition};
use tracing::{debug, warn};

/// Inputs shared by every rule applied to one record.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Record under validation
    pub record: &'a Record,
    /// Patterns compiled for the active rule set
    pub patterns: &'a PatternCache,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for one record.
    pub fn new(record: &'a Record, patterns: &'a PatternCache) -> Self {
        Self { record, patterns }
    }
}

/// Routes rules to their validators.
#[derive(Debug, Default)]
pub struct RuleDispatcher {
    format_validator: FormatValidator,
    range_validator: RangeValidator,
    completeness_validator: CompletenessValidator,
    uniqueness_validator: UniquenessValidator,
    cross_field_validator: CrossFieldValidator,
    custom_validator: CustomValidator,
}

impl RuleDispatcher {
    /// Creates a dispatcher with an empty custom-function registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher using the given custom validator.
    pub fn with_custom_validator(custom_validator: CustomValidator) -> Self {
        Self {
            custom_validator,
            ..Self::default()
        }
    }

    /// Mutable access to the custom validator.
    pub fn custom_validator_mut(&mut self) -> &mut CustomValidator {
        &mut self.custom_validator
    }

    /// Applies a rule to one field of the record.
    ///
    /// Returns `None` when the rule is skipped for this field.
    pub fn dispatch(
        &self,
        rule: &RuleDefinition,
        field: &str,
        ctx: RuleContext<'_>,
    ) -> Option<CheckOutcome> {
        let value = ctx.record.get(field);
        debug!(rule_id = %rule.id, rule_type = rule.rule_type(), field, "Dispatching rule");

        let outcome = match &rule.config {
            RuleConfig::Format(config) => {
                self.format_validator.validate(config, value, ctx.patterns)
            }
            RuleConfig::Range(config) => self.range_validator.validate(config, value),
            RuleConfig::Completeness(config) => {
                self.completeness_validator.validate(config, value)
            }
            RuleConfig::Uniqueness(config) => {
                self.uniqueness_validator.validate(config, value, ctx.record)
            }
            RuleConfig::CrossField(config) => {
                self.cross_field_validator
                    .validate(config, ctx.record, ctx.patterns)
            }
            RuleConfig::Custom(config) => {
                return self.custom_validator.validate(config, value, ctx.record);
            }
            RuleConfig::Unknown { rule_type, .. } => {
                warn!(rule_id = %rule.id, rule_type = %rule_type, "Unknown rule type");
                CheckOutcome::fail(format!("Unknown rule type: {}", rule_type))
            }
        };

        Some(outcome)
    }
}
