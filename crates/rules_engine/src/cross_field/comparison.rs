//! Comparison rules between two fields.
//!
//! When both values are date strings they compare as instants, otherwise as
//! numbers. The `sum*` operators always add the two values numerically and
//! compare the total against `expectedSum`.

use crate::CheckOutcome;
use crate::coercion::{display, display_number, is_date_like, to_number, to_timestamp_millis};
use rules_core::{ComparisonConfig, ComparisonOperator, DataValue, Record};

pub(super) fn validate(config: &ComparisonConfig, record: &Record) -> CheckOutcome {
    let (Some(field1), Some(field2), Some(operator)) = (
        config.field1.as_deref(),
        config.field2.as_deref(),
        config.comparison_operator,
    ) else {
        return CheckOutcome::pass();
    };

    let value1 = record.get(field1);
    let value2 = record.get(field2);
    let label = format!("{} {} {}", field1, operator.as_str(), field2);

    match operator {
        ComparisonOperator::SumEquals
        | ComparisonOperator::SumLessThan
        | ComparisonOperator::SumGreaterThan => {
            let Some(expected) = config.expected_sum else {
                return CheckOutcome::pass();
            };
            let sum = to_number(value1) + to_number(value2);
            let (passed, phrase) = match operator {
                ComparisonOperator::SumEquals => (sum == expected, "equal to"),
                ComparisonOperator::SumLessThan => (sum < expected, "less than"),
                _ => (sum > expected, "greater than"),
            };
            CheckOutcome::check(passed, || {
                format!(
                    "Comparison '{}' failed: sum {} is not {} {}",
                    label,
                    display_number(sum),
                    phrase,
                    display_number(expected)
                )
            })
        }
        ComparisonOperator::Unsupported => CheckOutcome::pass(),
        direct => {
            let (a, b) = comparable(value1, value2);
            let (passed, phrase) = match direct {
                ComparisonOperator::Equals => (a == b, "equal to"),
                ComparisonOperator::NotEquals => (a != b, "different from"),
                ComparisonOperator::GreaterThan => (a > b, "greater than"),
                ComparisonOperator::GreaterThanOrEqual => (a >= b, "greater than or equal to"),
                ComparisonOperator::LessThan => (a < b, "less than"),
                _ => (a <= b, "less than or equal to"),
            };
            CheckOutcome::check(passed, || {
                format!(
                    "Comparison '{}' failed: '{}' is not {} '{}'",
                    label,
                    display(value1),
                    phrase,
                    display(value2)
                )
            })
        }
    }
}

/// Maps both values onto one numeric scale: timestamps when both are dates.
fn comparable(value1: Option<&DataValue>, value2: Option<&DataValue>) -> (f64, f64) {
    if is_date_like(value1) && is_date_like(value2) {
        if let (Some(a), Some(b)) = (to_timestamp_millis(value1), to_timestamp_millis(value2)) {
            return (a, b);
        }
    }
    (to_number(value1), to_number(value2))
}
