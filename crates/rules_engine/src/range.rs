//! Range validation.
//!
//! Numeric bounds on a single value. The minimum is checked before the
//! maximum and a value failing the minimum is not checked against the maximum.

use crate::CheckOutcome;
use crate::coercion::{display_number, to_number};
use rules_core::{DataValue, RangeConfig};

/// Validates numeric ranges.
#[derive(Debug)]
pub struct RangeValidator;

impl RangeValidator {
    /// Creates a new range validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a value against a range configuration.
    pub fn validate(&self, config: &RangeConfig, value: Option<&DataValue>) -> CheckOutcome {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return CheckOutcome::pass();
        };

        let number = to_number(Some(value));
        if !number.is_finite() {
            return CheckOutcome::fail(format!(
                "Value '{}' is not a valid number for range validation",
                value
            ));
        }

        if let Some(min) = config.min {
            let below = if config.inclusive {
                number < min
            } else {
                number <= min
            };
            if below {
                return CheckOutcome::fail(if config.inclusive {
                    format!(
                        "Value {} is below the inclusive minimum of {}",
                        display_number(number),
                        display_number(min)
                    )
                } else {
                    format!(
                        "Value {} must be greater than the exclusive minimum of {}",
                        display_number(number),
                        display_number(min)
                    )
                });
            }
        }

        if let Some(max) = config.max {
            let above = if config.inclusive {
                number > max
            } else {
                number >= max
            };
            if above {
                return CheckOutcome::fail(if config.inclusive {
                    format!(
                        "Value {} is above the inclusive maximum of {}",
                        display_number(number),
                        display_number(max)
                    )
                } else {
                    format!(
                        "Value {} must be less than the exclusive maximum of {}",
                        display_number(number),
                        display_number(max)
                    )
                });
            }
        }

        CheckOutcome::pass()
    }
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self::new()
    }
}
