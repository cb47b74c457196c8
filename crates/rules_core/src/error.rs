//! Error types for rule definitions.
//!
//! Validation outcomes are never errors: a failing record is reported through
//! [`ValidationResult`](crate::ValidationResult)s. The errors here cover rule
//! definitions that cannot be represented at all and rule-store failures.

use thiserror::Error;

/// Result type for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Main error type for rule operations.
#[derive(Error, Debug)]
pub enum RuleError {
    /// Configuration does not fit the shape required by its rule type
    #[error("Invalid configuration for rule type '{rule_type}': {message}")]
    InvalidConfiguration {
        /// Rule type the configuration was declared for
        rule_type: String,
        /// Deserialization details
        message: String,
    },

    /// Rule store could not load or save rules
    #[error("Rule store error: {0}")]
    Store(String),
}

impl RuleError {
    /// Creates a new invalid configuration error.
    pub fn invalid_configuration(rule_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            rule_type: rule_type.into(),
            message: message.into(),
        }
    }

    /// Creates a new rule store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}
