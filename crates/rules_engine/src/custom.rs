//! Custom rule functions.
//!
//! Custom rules name a function through `configuration.functionName`. The
//! function is looked up in a [`CustomFunctionRegistry`] and called with the
//! field value, the whole record, and `configuration.parameters`. Rules naming
//! no function, or a function that is not registered, pass.

use crate::CheckOutcome;
use rules_core::{CustomConfig, DataValue, Record};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Signature of a custom rule function.
///
/// Returning `None` skips the rule for this field: no result is recorded.
pub type CustomFunction =
    dyn Fn(Option<&DataValue>, &Record, &Value) -> Option<CheckOutcome> + Send + Sync;

/// Name → function table for custom rules.
#[derive(Clone, Default)]
pub struct CustomFunctionRegistry {
    functions: HashMap<String, Arc<CustomFunction>>,
}

impl CustomFunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function, replacing any function with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(Option<&DataValue>, &Record, &Value) -> Option<CheckOutcome> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
    }

    /// Looks up a function by name.
    pub fn get(&self, name: &str) -> Option<&CustomFunction> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    /// Returns true if a function is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if no function is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for CustomFunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CustomFunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}

/// Runs custom rule functions.
#[derive(Debug, Default)]
pub struct CustomValidator {
    registry: CustomFunctionRegistry,
}

impl CustomValidator {
    /// Creates a custom validator with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a custom validator over an existing registry.
    pub fn with_registry(registry: CustomFunctionRegistry) -> Self {
        Self { registry }
    }

    /// Mutable access to the registry.
    pub fn registry_mut(&mut self) -> &mut CustomFunctionRegistry {
        &mut self.registry
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &CustomFunctionRegistry {
        &self.registry
    }

    /// Validates a value with the configured custom function.
    ///
    /// Returns `None` when the function skips the field.
    pub fn validate(
        &self,
        config: &CustomConfig,
        value: Option<&DataValue>,
        record: &Record,
    ) -> Option<CheckOutcome> {
        let Some(name) = config.function_name.as_deref() else {
            return Some(CheckOutcome::pass());
        };

        match self.registry.get(name) {
            Some(function) => function(value, record, &config.parameters),
            None => {
                debug!(function = name, "Custom function not registered, passing");
                Some(CheckOutcome::pass())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(name: &str, parameters: Value) -> CustomConfig {
        CustomConfig {
            function_name: Some(name.to_string()),
            parameters,
        }
    }

    #[test]
    fn test_empty_registry_passes() {
        let validator = CustomValidator::new();
        let outcome = validator.validate(&config("luhn", Value::Null), None, &Record::new());
        assert_eq!(outcome, Some(CheckOutcome::pass()));

        let outcome = validator.validate(&CustomConfig::default(), None, &Record::new());
        assert_eq!(outcome, Some(CheckOutcome::pass()));
    }

    #[test]
    fn test_registered_function_receives_parameters() {
        let mut registry = CustomFunctionRegistry::new();
        registry.register("divisibleBy", |value, _record, params| {
            let divisor = params.get("divisor")?.as_i64()?;
            let value = value?.as_int()?;
            Some(CheckOutcome::check(value % divisor == 0, || {
                format!("Value {} is not divisible by {}", value, divisor)
            }))
        });
        let validator = CustomValidator::with_registry(registry);

        let cfg = config("divisibleBy", json!({ "divisor": 5 }));
        let record = Record::new();
        assert_eq!(
            validator.validate(&cfg, Some(&DataValue::Int(10)), &record),
            Some(CheckOutcome::pass())
        );
        assert_eq!(
            validator.validate(&cfg, Some(&DataValue::Int(7)), &record),
            Some(CheckOutcome::fail("Value 7 is not divisible by 5"))
        );
        // The function skips non-integers
        assert_eq!(validator.validate(&cfg, Some(&"x".into()), &record), None);
    }

    #[test]
    fn test_registry_accessors() {
        let mut validator = CustomValidator::new();
        assert!(validator.registry().is_empty());

        validator.registry_mut().register("nonEmpty", |value, _, _| {
            Some(CheckOutcome::check(value.is_some(), || "empty".to_string()))
        });
        assert!(validator.registry().contains("nonEmpty"));
        assert_eq!(
            validator.validate(&config("nonEmpty", Value::Null), None, &Record::new()),
            Some(CheckOutcome::fail("empty"))
        );
    }

    #[test]
    fn test_registry_debug_lists_names() {
        let mut registry = CustomFunctionRegistry::new();
        registry.register("b", |_, _, _| None);
        registry.register("a", |_, _, _| None);
        assert_eq!(
            format!("{:?}", registry),
            r#"CustomFunctionRegistry { functions: ["a", "b"] }"#
        );
        assert!(registry.contains("a"));
        assert_eq!(registry.len(), 2);
    }
}
