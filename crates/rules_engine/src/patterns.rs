//! Regex patterns used by rule configurations.
//!
//! Patterns are compiled once when a rule set is loaded; validation only looks
//! them up. A pattern that fails to compile keeps its error so every record
//! validated against it reports the same failure.

use regex::Regex;
use rules_core::{
    CrossFieldConfig, CrossFieldMode, RuleConfig, RuleDefinition, TargetConditionKind,
};
use std::collections::HashMap;
use tracing::warn;

/// Compiled regex patterns keyed by their source text.
#[derive(Debug, Clone, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Result<Regex, String>>,
}

impl PatternCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every pattern referenced by the given rules.
    pub fn compile<'a>(rules: impl IntoIterator<Item = &'a RuleDefinition>) -> Self {
        let mut cache = Self::new();
        for rule in rules {
            if let Some(pattern) = rule_pattern(rule) {
                cache.insert(&rule.id, pattern);
            }
        }
        cache
    }

    fn insert(&mut self, rule_id: &str, pattern: &str) {
        if self.patterns.contains_key(pattern) {
            return;
        }

        let compiled = Regex::new(pattern).map_err(|e| e.to_string());
        if let Err(error) = &compiled {
            warn!(rule_id, pattern, %error, "Rule pattern does not compile");
        }
        self.patterns.insert(pattern.to_string(), compiled);
    }

    /// Number of cached patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no pattern is cached.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the compile error of a cached pattern, if any.
    pub fn error(&self, pattern: &str) -> Option<&str> {
        match self.patterns.get(pattern) {
            Some(Err(error)) => Some(error),
            _ => None,
        }
    }

    /// Tests whether the pattern matches anywhere in `text`.
    ///
    /// Patterns missing from the cache are compiled on the spot.
    pub fn is_match(&self, pattern: &str, text: &str) -> Result<bool, String> {
        match self.patterns.get(pattern) {
            Some(Ok(regex)) => Ok(regex.is_match(text)),
            Some(Err(error)) => Err(error.clone()),
            None => Regex::new(pattern)
                .map(|regex| regex.is_match(text))
                .map_err(|e| e.to_string()),
        }
    }
}

/// Returns the regex pattern a rule's configuration carries, if any.
pub fn rule_pattern(rule: &RuleDefinition) -> Option<&str> {
    match &rule.config {
        RuleConfig::Format(config) => config.pattern.as_deref(),
        RuleConfig::CrossField(CrossFieldConfig::Typed(CrossFieldMode::Conditional(config))) => {
            config
                .target_condition
                .as_ref()
                .filter(|condition| condition.kind == Some(TargetConditionKind::Format))
                .and_then(|condition| condition.pattern.as_deref())
        }
        _ => None,
    }
}
