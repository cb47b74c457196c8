//! Main validation engine.
//!
//! This module provides the `RuleEngine` that owns the active rule set and
//! applies it to records. Loading a rule set replaces the previous one
//! wholesale; validations already running keep the set they started with.

use crate::dispatch::{RuleContext, RuleDispatcher};
use crate::resolver::TargetMatcher;
use crate::{CheckOutcome, CustomFunctionRegistry, CustomValidator, PatternCache};
use parking_lot::RwLock;
use rules_core::{
    DataValue, Record, RuleDefinition, ValidationReport, ValidationResult, ValidationStats,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A rule together with its compiled target pattern.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// The rule as loaded
    pub definition: RuleDefinition,
    /// Compiled `target.field`
    pub target: TargetMatcher,
}

/// An immutable, loaded rule set.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    patterns: PatternCache,
}

impl RuleSet {
    /// Compiles a rule set, keeping rule order.
    pub fn new(rules: Vec<RuleDefinition>) -> Self {
        let patterns = PatternCache::compile(&rules);
        let rules = rules
            .into_iter()
            .map(|definition| CompiledRule {
                target: TargetMatcher::new(&definition.target.field),
                definition,
            })
            .collect();

        Self { rules, patterns }
    }

    /// Rules in load order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter().map(|rule| &rule.definition)
    }

    /// Enabled rules in load order.
    pub fn enabled(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter().filter(|rule| rule.definition.enabled)
    }

    /// Patterns compiled for this set.
    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Number of rules, enabled or not.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Rule validation engine.
///
/// The engine is `Send + Sync`: share it behind an `Arc` and call
/// [`load_rules`](Self::load_rules) and [`validate`](Self::validate) from any
/// thread.
///
/// # Example
///
/// ```rust
/// use rules_core::{DataValue, RangeConfig, Record, RuleBuilder, RuleConfig};
/// use rules_engine::RuleEngine;
///
/// let engine = RuleEngine::new();
/// engine.load_rules(vec![
///     RuleBuilder::new("age-range", "Age range")
///         .target("age")
///         .config(RuleConfig::Range(RangeConfig {
///             min: Some(0.0),
///             max: Some(150.0),
///             inclusive: true,
///         }))
///         .build(),
/// ]);
///
/// let record = Record::from([("age".to_string(), DataValue::Int(151))]);
/// let report = engine.validate_report(&record);
///
/// if report.passed {
///     println!("Validation passed!");
/// } else {
///     for error in &report.errors {
///         println!("Error: {}", error);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct RuleEngine {
    active: RwLock<Arc<RuleSet>>,
    dispatcher: RuleDispatcher,
}

impl RuleEngine {
    /// Creates an engine with an empty rule set.
    pub fn new() -> Self {
        Self {
            active: RwLock::new(Arc::new(RuleSet::default())),
            dispatcher: RuleDispatcher::new(),
        }
    }

    /// Creates an engine using an existing custom-function registry.
    pub fn with_registry(registry: CustomFunctionRegistry) -> Self {
        Self {
            active: RwLock::new(Arc::new(RuleSet::default())),
            dispatcher: RuleDispatcher::with_custom_validator(CustomValidator::with_registry(
                registry,
            )),
        }
    }

    /// Registers a custom function, builder style.
    pub fn with_custom_function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(Option<&DataValue>, &Record, &Value) -> Option<CheckOutcome> + Send + Sync + 'static,
    {
        self.register_custom_function(name, function);
        self
    }

    /// Registers a custom function, replacing any function with the same name.
    pub fn register_custom_function<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(Option<&DataValue>, &Record, &Value) -> Option<CheckOutcome> + Send + Sync + 'static,
    {
        self.dispatcher
            .custom_validator_mut()
            .registry_mut()
            .register(name, function);
    }

    /// Replaces the active rule set.
    ///
    /// Rules are taken as given: no shape validation happens here. Regex
    /// patterns are compiled before the swap, so validations never wait on
    /// compilation.
    pub fn load_rules(&self, rules: Vec<RuleDefinition>) {
        let rule_set = RuleSet::new(rules);
        info!(
            rules = rule_set.len(),
            enabled = rule_set.enabled().count(),
            patterns = rule_set.patterns().len(),
            "Loaded rule set"
        );
        *self.active.write() = Arc::new(rule_set);
    }

    /// Returns the active rule set.
    pub fn rule_set(&self) -> Arc<RuleSet> {
        Arc::clone(&self.active.read())
    }

    /// Returns a copy of the active rules in load order.
    pub fn rules(&self) -> Vec<RuleDefinition> {
        self.rule_set().rules().cloned().collect()
    }

    /// Validates a record against the active rule set.
    ///
    /// Results follow rule load order, then field match order. Disabled rules
    /// and rules matching no field contribute nothing.
    pub fn validate(&self, record: &Record) -> Vec<ValidationResult> {
        self.evaluate(&self.rule_set(), record)
    }

    fn evaluate(&self, rule_set: &RuleSet, record: &Record) -> Vec<ValidationResult> {
        let ctx = RuleContext::new(record, rule_set.patterns());
        let mut results = Vec::new();

        for rule in rule_set.enabled() {
            let definition = &rule.definition;
            let fields = rule.target.resolve(record);
            if fields.is_empty() {
                debug!(rule_id = %definition.id, target = %definition.target.field, "Rule matched no field");
                continue;
            }

            for field in fields {
                let Some(outcome) = self.dispatcher.dispatch(definition, field, ctx) else {
                    continue;
                };

                results.push(ValidationResult {
                    rule_id: definition.id.clone(),
                    rule_name: definition.name.clone(),
                    field: field.to_string(),
                    value: record.get(field).cloned(),
                    severity: definition.severity.clone(),
                    passed: outcome.passed,
                    message: outcome.message,
                });
            }
        }

        results
    }

    /// Validates a record and summarizes the results.
    pub fn validate_report(&self, record: &Record) -> ValidationReport {
        let start = Instant::now();
        let rule_set = self.rule_set();
        let results = self.evaluate(&rule_set, record);

        ValidationReport::from_results(
            results,
            ValidationStats {
                rules_evaluated: rule_set.enabled().count(),
                fields_checked: record.len(),
                results_failed: 0,
                duration_ms: start.elapsed().as_millis() as u64,
            },
        )
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
