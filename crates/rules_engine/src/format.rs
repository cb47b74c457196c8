//! Format validation.
//!
//! A format rule checks the shape of a present value: first against an
//! optional built-in data type, then against an optional regex pattern.
//! Missing and null values always pass; presence is the completeness rule's job.

use crate::coercion::{to_number, to_timestamp_millis};
use crate::{CheckOutcome, PatternCache};
use regex::Regex;
use rules_core::{DataValue, FormatConfig, FormatDataType};
use std::sync::LazyLock;
use validator::{ValidateEmail, ValidateUrl};

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$")
        .expect("phone pattern is valid")
});

/// Validates value formats.
#[derive(Debug)]
pub struct FormatValidator;

impl FormatValidator {
    /// Creates a new format validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a value against a format configuration.
    pub fn validate(
        &self,
        config: &FormatConfig,
        value: Option<&DataValue>,
        patterns: &PatternCache,
    ) -> CheckOutcome {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return CheckOutcome::pass();
        };

        if let Some(data_type) = config.data_type {
            if let Some(message) = self.check_data_type(data_type, value) {
                return CheckOutcome::fail(message);
            }
        }

        if let Some(pattern) = &config.pattern {
            return match patterns.is_match(pattern, &value.to_string()) {
                Ok(true) => CheckOutcome::pass(),
                Ok(false) => CheckOutcome::fail(format!(
                    "Value '{}' does not match required format pattern",
                    value
                )),
                Err(error) => {
                    CheckOutcome::fail(format!("Invalid format pattern '{}': {}", pattern, error))
                }
            };
        }

        CheckOutcome::pass()
    }

    /// Runs the built-in checker for a data type. Returns the failure message.
    fn check_data_type(&self, data_type: FormatDataType, value: &DataValue) -> Option<String> {
        let text = value.to_string();

        let (valid, description) = match data_type {
            FormatDataType::Email => (text.validate_email(), "email address"),
            FormatDataType::Phone => (PHONE_PATTERN.is_match(&text), "phone number"),
            FormatDataType::Url => (text.validate_url(), "URL"),
            FormatDataType::Number => (to_number(Some(value)).is_finite(), "number"),
            FormatDataType::Date => (to_timestamp_millis(Some(value)).is_some(), "date"),
            FormatDataType::Other => return None,
        };

        (!valid).then(|| format!("Value '{}' is not a valid {}", value, description))
    }
}

impl Default for FormatValidator {
    fn default() -> Self {
        Self::new()
    }
}
