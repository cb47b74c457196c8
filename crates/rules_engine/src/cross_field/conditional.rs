//! Conditional rules: when a condition on one field holds, another field must
//! satisfy a target condition.

use crate::coercion::{display_number, loose_eq, to_number};
use crate::{CheckOutcome, PatternCache};
use rules_core::{
    ConditionOperator, ConditionalConfig, DataValue, Record, TargetCondition, TargetConditionKind,
};

pub(super) fn validate(
    config: &ConditionalConfig,
    record: &Record,
    patterns: &PatternCache,
) -> CheckOutcome {
    let (Some(condition_field), Some(condition_value), Some(target_field), Some(target)) = (
        config.condition_field.as_deref(),
        config.condition_value.as_ref(),
        config.target_field.as_deref(),
        config.target_condition.as_ref(),
    ) else {
        return CheckOutcome::pass();
    };

    let operator = config.condition_operator;
    if !condition_holds(operator, record.get(condition_field), condition_value) {
        return CheckOutcome::pass();
    }

    let when = format!(
        "when '{}' {} '{}'",
        condition_field,
        operator.as_str(),
        condition_value
    );
    check_target(target, target_field, record.get(target_field), &when, patterns)
}

/// Evaluates `actual <operator> expected`.
pub(super) fn condition_holds(
    operator: ConditionOperator,
    actual: Option<&DataValue>,
    expected: &DataValue,
) -> bool {
    let numbers = || (to_number(actual), to_number(Some(expected)));
    let text = || match actual {
        None | Some(DataValue::Null) => None,
        Some(value) => Some((value.to_string(), expected.to_string())),
    };

    match operator {
        ConditionOperator::Equals => loose_eq(actual, Some(expected)),
        ConditionOperator::NotEquals => !loose_eq(actual, Some(expected)),
        ConditionOperator::GreaterThan => {
            let (a, b) = numbers();
            a > b
        }
        ConditionOperator::GreaterThanOrEqual => {
            let (a, b) = numbers();
            a >= b
        }
        ConditionOperator::LessThan => {
            let (a, b) = numbers();
            a < b
        }
        ConditionOperator::LessThanOrEqual => {
            let (a, b) = numbers();
            a <= b
        }
        ConditionOperator::Contains => text().is_some_and(|(a, b)| a.contains(&b)),
        ConditionOperator::StartsWith => text().is_some_and(|(a, b)| a.starts_with(&b)),
        ConditionOperator::EndsWith => text().is_some_and(|(a, b)| a.ends_with(&b)),
        ConditionOperator::Unsupported => false,
    }
}

fn check_target(
    target: &TargetCondition,
    field: &str,
    value: Option<&DataValue>,
    when: &str,
    patterns: &PatternCache,
) -> CheckOutcome {
    let present = value.filter(|v| !v.is_null());

    match target.kind {
        Some(TargetConditionKind::Required) => {
            let filled = present.is_some_and(|v| v.as_str() != Some(""));
            CheckOutcome::check(filled, || format!("Field '{}' is required {}", field, when))
        }
        Some(TargetConditionKind::Format) => {
            let (Some(pattern), Some(value)) = (target.pattern.as_deref(), present) else {
                return CheckOutcome::pass();
            };
            match patterns.is_match(pattern, &value.to_string()) {
                Ok(matched) => CheckOutcome::check(matched, || {
                    format!("Field '{}' does not match required format {}", field, when)
                }),
                Err(error) => {
                    CheckOutcome::fail(format!("Invalid format pattern '{}': {}", pattern, error))
                }
            }
        }
        Some(TargetConditionKind::Range) => {
            let Some(value) = present else {
                return CheckOutcome::pass();
            };
            let number = to_number(Some(value));
            if number.is_nan() {
                return CheckOutcome::fail(format!(
                    "Field '{}' must be a valid number {}",
                    field, when
                ));
            }
            if let Some(min) = target.min.filter(|min| number < *min) {
                return CheckOutcome::fail(format!(
                    "Field '{}' must be at least {} {}",
                    field,
                    display_number(min),
                    when
                ));
            }
            if let Some(max) = target.max.filter(|max| number > *max) {
                return CheckOutcome::fail(format!(
                    "Field '{}' must be at most {} {}",
                    field,
                    display_number(max),
                    when
                ));
            }
            CheckOutcome::pass()
        }
        Some(TargetConditionKind::Unsupported) | None => CheckOutcome::pass(),
    }
}
