//! Dependency rules: a trigger value on one field requires another field.

use crate::CheckOutcome;
use crate::coercion::{is_blank, loose_eq};
use rules_core::{DependencyConfig, Record};

pub(super) fn validate(config: &DependencyConfig, record: &Record) -> CheckOutcome {
    let (Some(dependent_field), Some(required_value), Some(target_field)) = (
        config.dependent_field.as_deref(),
        config.required_value.as_ref(),
        config.target_field.as_deref(),
    ) else {
        return CheckOutcome::pass();
    };

    let triggered = loose_eq(record.get(dependent_field), Some(required_value));
    CheckOutcome::check(!triggered || !is_blank(record.get(target_field)), || {
        format!(
            "Field '{}' is required when '{}' is '{}'",
            target_field, dependent_field, required_value
        )
    })
}
