//! Legacy free-form conditions, configured as `dependentField` + `condition`.

use super::Expression;
use crate::CheckOutcome;
use rules_core::{LegacyConfig, Record};
use tracing::debug;

pub(super) fn validate(config: &LegacyConfig, record: &Record) -> CheckOutcome {
    let (Some(dependent_field), Some(condition)) =
        (config.dependent_field.as_deref(), config.condition.as_deref())
    else {
        return CheckOutcome::pass();
    };

    let expression = match Expression::parse(condition) {
        Ok(expression) => expression,
        Err(error) => {
            debug!(condition, %error, "Legacy condition failed to parse");
            return CheckOutcome::fail(format!("Condition evaluation error: {}", error));
        }
    };

    CheckOutcome::check(expression.evaluate(record.get(dependent_field), record), || {
        format!(
            "Condition '{}' not satisfied for field '{}'",
            condition, dependent_field
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rules_core::DataValue;

    fn config(condition: &str) -> LegacyConfig {
        LegacyConfig {
            dependent_field: Some("endDate".into()),
            condition: Some(condition.into()),
        }
    }

    fn record() -> Record {
        Record::from([
            ("startDate".to_string(), DataValue::from("2023-01-01")),
            ("endDate".to_string(), DataValue::from("2023-12-31")),
            ("quantity".to_string(), DataValue::Int(3)),
        ])
    }

    #[test]
    fn test_condition_satisfied() {
        assert!(validate(&config("!= {startDate}"), &record()).passed);
        assert!(validate(&config("includes '2023'"), &record()).passed);
    }

    #[test]
    fn test_condition_not_satisfied() {
        let outcome = validate(&config("== {startDate}"), &record());
        assert_eq!(
            outcome.message.as_deref(),
            Some("Condition '== {startDate}' not satisfied for field 'endDate'")
        );
    }

    #[test]
    fn test_parse_error_reported() {
        let outcome = validate(&config("endDate after startDate"), &record());
        assert!(!outcome.passed);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Condition evaluation error: no supported operator in 'endDate after startDate'")
        );
    }

    #[test]
    fn test_incomplete_configuration_passes() {
        let cfg = LegacyConfig {
            dependent_field: None,
            condition: Some("== 1".into()),
        };
        assert!(validate(&cfg, &record()).passed);
        assert!(validate(&LegacyConfig::default(), &record()).passed);
    }
}
