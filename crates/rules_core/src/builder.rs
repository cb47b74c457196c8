//! Builder pattern for creating rule definitions.
//!
//! This module provides an ergonomic builder for constructing rules with a
//! fluent API, mostly used by tests and embedding services.

use crate::{RuleConfig, RuleDefinition, RuleTarget};

/// Builder for creating a `RuleDefinition`.
///
/// The target defaults to `*`, severity to `error`, and rules are enabled
/// unless stated otherwise.
///
/// # Example
///
/// ```rust
/// use rules_core::{CompletenessConfig, RuleBuilder, RuleConfig};
///
/// let rule = RuleBuilder::new("name-required", "Name required")
///     .description("Every record needs a name")
///     .target("name")
///     .severity("warning")
///     .config(RuleConfig::Completeness(CompletenessConfig {
///         required: true,
///         ..Default::default()
///     }))
///     .build();
///
/// assert_eq!(rule.target.field, "name");
/// assert_eq!(rule.severity, "warning");
/// ```
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    target: Option<String>,
    config: Option<RuleConfig>,
    severity: Option<String>,
    enabled: Option<bool>,
}

impl RuleBuilder {
    /// Creates a new rule builder with required fields.
    ///
    /// # Arguments
    ///
    /// * `id` - Rule identifier, unique within a rule set
    /// * `name` - Human-readable rule name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Sets the rule description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the target field pattern.
    pub fn target(mut self, field: impl Into<String>) -> Self {
        self.target = Some(field.into());
        self
    }

    /// Sets the rule kind and configuration.
    pub fn config(mut self, config: RuleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the severity.
    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Enables or disables the rule.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Builds the rule.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is not set.
    pub fn build(self) -> RuleDefinition {
        RuleDefinition {
            id: self.id.expect("id is required"),
            name: self.name.expect("name is required"),
            description: self.description,
            target: RuleTarget::new(self.target.unwrap_or_else(|| "*".to_string())),
            config: self.config.expect("config is required"),
            severity: self.severity.unwrap_or_else(|| "error".to_string()),
            enabled: self.enabled.unwrap_or(true),
        }
    }
}
