//! Rule definition types.
//!
//! This module contains the declarative rule model: the rule envelope
//! ([`RuleDefinition`]), its field target, and one configuration type per rule
//! kind. On the wire a rule carries a `ruleType` string next to an untyped
//! `configuration` object; in memory the pair is folded into [`RuleConfig`].

use crate::{DataValue, RuleError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A declarative validation rule.
///
/// Rules are immutable from the engine's perspective: the engine reads them
/// and never writes back.
///
/// # Example
///
/// ```rust
/// use rules_core::{RuleConfig, RuleDefinition};
///
/// let rule: RuleDefinition = serde_json::from_str(r#"{
///     "id": "email-format",
///     "name": "Email format",
///     "ruleType": "format",
///     "target": { "field": "*email*" },
///     "configuration": { "dataType": "email" }
/// }"#).unwrap();
///
/// assert!(matches!(rule.config, RuleConfig::Format(_)));
/// assert_eq!(rule.severity, "error");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleDefinition", into = "RawRuleDefinition")]
pub struct RuleDefinition {
    /// Identifier, unique within a loaded rule set
    pub id: String,

    /// Human-readable rule name
    pub name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Field pattern the rule applies to
    pub target: RuleTarget,

    /// Rule kind together with its kind-specific configuration
    pub config: RuleConfig,

    /// Severity copied onto every result (e.g. "error", "warning", "info")
    pub severity: String,

    /// Disabled rules are skipped entirely
    pub enabled: bool,
}

impl RuleDefinition {
    /// Returns the wire name of this rule's kind.
    pub fn rule_type(&self) -> &str {
        self.config.rule_type()
    }
}

/// Field target of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTarget {
    /// Field name, `*`, or a pattern containing `*` wildcards
    pub field: String,
}

impl RuleTarget {
    /// Creates a new target for the given field pattern.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// Rule kind and its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConfig {
    /// Value shape checks (built-in data types and regex patterns)
    Format(FormatConfig),
    /// Numeric bounds
    Range(RangeConfig),
    /// Presence, emptiness and minimum length
    Completeness(CompletenessConfig),
    /// Duplicate values within the record
    Uniqueness(UniquenessConfig),
    /// Predicates spanning several fields
    CrossField(CrossFieldConfig),
    /// Registered custom function
    Custom(CustomConfig),
    /// Rule type outside the known kinds; reported as a failure at validation time
    Unknown {
        /// The declared rule type
        rule_type: String,
        /// The untouched configuration
        configuration: Value,
    },
}

impl RuleConfig {
    /// Returns the wire name of the rule kind.
    pub fn rule_type(&self) -> &str {
        match self {
            RuleConfig::Format(_) => "format",
            RuleConfig::Range(_) => "range",
            RuleConfig::Completeness(_) => "completeness",
            RuleConfig::Uniqueness(_) => "uniqueness",
            RuleConfig::CrossField(_) => "crossField",
            RuleConfig::Custom(_) => "custom",
            RuleConfig::Unknown { rule_type, .. } => rule_type,
        }
    }

    /// Builds a typed configuration from a rule type and its raw configuration.
    ///
    /// A missing (`null`) configuration is read as an empty object. Unknown rule
    /// types are preserved as [`RuleConfig::Unknown`].
    pub fn from_parts(rule_type: &str, configuration: Value) -> Result<Self, RuleError> {
        let configuration = match configuration {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        let config = match rule_type {
            "format" => RuleConfig::Format(typed(rule_type, configuration)?),
            "range" => RuleConfig::Range(typed(rule_type, configuration)?),
            "completeness" => RuleConfig::Completeness(typed(rule_type, configuration)?),
            "uniqueness" => RuleConfig::Uniqueness(typed(rule_type, configuration)?),
            "crossField" => RuleConfig::CrossField(typed(rule_type, configuration)?),
            "custom" => RuleConfig::Custom(typed(rule_type, configuration)?),
            other => RuleConfig::Unknown {
                rule_type: other.to_string(),
                configuration,
            },
        };

        Ok(config)
    }

    /// Splits the configuration back into its wire representation.
    pub fn to_parts(&self) -> (String, Value) {
        let configuration = match self {
            RuleConfig::Format(c) => serde_json::to_value(c),
            RuleConfig::Range(c) => serde_json::to_value(c),
            RuleConfig::Completeness(c) => serde_json::to_value(c),
            RuleConfig::Uniqueness(c) => serde_json::to_value(c),
            RuleConfig::CrossField(c) => serde_json::to_value(c),
            RuleConfig::Custom(c) => serde_json::to_value(c),
            RuleConfig::Unknown { configuration, .. } => Ok(configuration.clone()),
        };

        // Plain structs with string keys always serialize to a JSON value
        (self.rule_type().to_string(), configuration.unwrap_or_default())
    }
}

fn typed<T: DeserializeOwned>(rule_type: &str, configuration: Value) -> Result<T, RuleError> {
    serde_json::from_value(configuration)
        .map_err(|e| RuleError::invalid_configuration(rule_type, e.to_string()))
}

/// Configuration of a format rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatConfig {
    /// Regular expression the stringified value must contain a match for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Built-in data type checked before the pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<FormatDataType>,
}

/// Built-in data types understood by format rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatDataType {
    /// Email address
    Email,
    /// 3-3-4 digit phone number
    Phone,
    /// Absolute URL
    Url,
    /// Finite number
    Number,
    /// Calendar date
    Date,
    /// Any other name; no built-in check runs
    #[serde(other)]
    Other,
}

/// Configuration of a range rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Whether the bounds themselves are allowed
    #[serde(default = "default_true")]
    pub inclusive: bool,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            inclusive: true,
        }
    }
}

/// Configuration of a completeness rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessConfig {
    /// Value must be present and not null
    #[serde(default)]
    pub required: bool,

    /// Value must not be empty after trimming
    #[serde(default)]
    pub not_empty: bool,

    /// Minimum length of the stringified value, in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

/// Configuration of a uniqueness rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniquenessConfig {
    /// Declared scope; evaluation is always within the current record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<UniquenessScope>,
}

/// Declared uniqueness scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniquenessScope {
    /// Collection-wide
    Collection,
    /// Dataset-wide
    Dataset,
}

/// Configuration of a custom rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomConfig {
    /// Name of the registered custom function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    /// Opaque parameters handed to the function
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub parameters: Value,
}

/// Configuration of a cross-field rule.
///
/// Typed modes carry a `type` discriminator; configurations without one are
/// legacy free-form conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrossFieldConfig {
    /// Mode selected by `configuration.type`
    Typed(CrossFieldMode),
    /// Free-form condition expression
    Legacy(LegacyConfig),
}

impl Default for CrossFieldConfig {
    fn default() -> Self {
        CrossFieldConfig::Legacy(LegacyConfig::default())
    }
}

/// Typed cross-field modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CrossFieldMode {
    /// Condition on one field gates a check on another
    Conditional(ConditionalConfig),
    /// Direct or additive comparison of two fields
    Comparison(ComparisonConfig),
    /// Field value requires another field to be filled
    Dependency(DependencyConfig),
    /// Named business rule from the fixed catalogue
    BusinessRule(BusinessRuleConfig),
}

/// Configuration of a conditional cross-field rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<DataValue>,
    #[serde(default)]
    pub condition_operator: ConditionOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_condition: Option<TargetCondition>,
}

/// Operators usable in a conditional rule's condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    StartsWith,
    EndsWith,
    /// Unrecognized operator; the condition never holds
    #[serde(other)]
    Unsupported,
}

impl ConditionOperator {
    /// Returns the wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "notEquals",
            ConditionOperator::GreaterThan => "greaterThan",
            ConditionOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            ConditionOperator::LessThan => "lessThan",
            ConditionOperator::LessThanOrEqual => "lessThanOrEqual",
            ConditionOperator::Contains => "contains",
            ConditionOperator::StartsWith => "startsWith",
            ConditionOperator::EndsWith => "endsWith",
            ConditionOperator::Unsupported => "unsupported",
        }
    }
}

/// Check applied to the target field once a condition holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetCondition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TargetConditionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Kinds of target condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetConditionKind {
    Required,
    Format,
    Range,
    #[serde(other)]
    Unsupported,
}

/// Configuration of a comparison cross-field rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_operator: Option<ComparisonOperator>,
    /// Expected total for the `sum*` operators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_sum: Option<f64>,
}

/// Operators usable in a comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    SumEquals,
    SumLessThan,
    SumGreaterThan,
    /// Unrecognized operator; the comparison is not evaluated
    #[serde(other)]
    Unsupported,
}

impl ComparisonOperator {
    /// Returns the wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equals => "equals",
            ComparisonOperator::NotEquals => "notEquals",
            ComparisonOperator::GreaterThan => "greaterThan",
            ComparisonOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            ComparisonOperator::LessThan => "lessThan",
            ComparisonOperator::LessThanOrEqual => "lessThanOrEqual",
            ComparisonOperator::SumEquals => "sumEquals",
            ComparisonOperator::SumLessThan => "sumLessThan",
            ComparisonOperator::SumGreaterThan => "sumGreaterThan",
            ComparisonOperator::Unsupported => "unsupported",
        }
    }
}

/// Configuration of a dependency cross-field rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_value: Option<DataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
}

/// Configuration of a business-rule cross-field rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_rule: Option<BusinessRule>,
}

/// The fixed business-rule catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessRule {
    /// Adults must provide an ID type and a verification document
    AgeVerification,
    /// At least one contact channel must be filled
    EmailPhoneRequired,
    /// Minors need guardian consent and a guardian email
    MinorsConsent,
    /// High salaries need verification; positive salaries need a known employment status
    SalaryVerification,
    /// Not in the catalogue; always passes
    #[serde(other)]
    Unknown,
}

/// Configuration of a legacy cross-field rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_field: Option<String>,
    /// Expression such as `>= {minAge}` or `includes "@"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_severity() -> String {
    "error".to_string()
}

/// Wire representation of a rule.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRuleDefinition {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    rule_type: String,
    target: RuleTarget,
    #[serde(default)]
    configuration: Value,
    #[serde(default = "default_severity")]
    severity: String,
    #[serde(default = "default_true")]
    enabled: bool,
}

impl TryFrom<RawRuleDefinition> for RuleDefinition {
    type Error = RuleError;

    fn try_from(raw: RawRuleDefinition) -> Result<Self, Self::Error> {
        Ok(Self {
            config: RuleConfig::from_parts(&raw.rule_type, raw.configuration)?,
            id: raw.id,
            name: raw.name,
            description: raw.description,
            target: raw.target,
            severity: raw.severity,
            enabled: raw.enabled,
        })
    }
}

impl From<RuleDefinition> for RawRuleDefinition {
    fn from(rule: RuleDefinition) -> Self {
        let (rule_type, configuration) = rule.config.to_parts();
        Self {
            id: rule.id,
            name: rule.name,
            description: rule.description,
            rule_type,
            target: rule.target,
            configuration,
            severity: rule.severity,
            enabled: rule.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: Value) -> RuleDefinition {
        serde_json::from_value(value).expect("rule should parse")
    }

    #[test]
    fn test_defaults_applied() {
        let rule = parse(json!({
            "id": "r1",
            "name": "Rule",
            "ruleType": "range",
            "target": { "field": "age" },
            "configuration": { "min": 0 }
        }));

        assert_eq!(rule.severity, "error");
        assert!(rule.enabled);
        assert_eq!(
            rule.config,
            RuleConfig::Range(RangeConfig {
                min: Some(0.0),
                max: None,
                inclusive: true,
            })
        );
    }

    #[test]
    fn test_missing_configuration_is_empty() {
        let rule = parse(json!({
            "id": "r1",
            "name": "Rule",
            "ruleType": "completeness",
            "target": { "field": "name" }
        }));

        assert_eq!(
            rule.config,
            RuleConfig::Completeness(CompletenessConfig::default())
        );
    }

    #[test]
    fn test_unknown_rule_type_preserved() {
        let rule = parse(json!({
            "id": "r1",
            "name": "Rule",
            "ruleType": "checksum",
            "target": { "field": "*" },
            "configuration": { "algorithm": "luhn" }
        }));

        assert_eq!(rule.rule_type(), "checksum");
        assert!(matches!(rule.config, RuleConfig::Unknown { .. }));
    }

    #[test]
    fn test_wrongly_shaped_configuration_rejected() {
        let err = serde_json::from_value::<RuleDefinition>(json!({
            "id": "r1",
            "name": "Rule",
            "ruleType": "range",
            "target": { "field": "age" },
            "configuration": { "min": "ten" }
        }))
        .unwrap_err();

        assert!(err.to_string().contains("range"));
    }

    #[test]
    fn test_cross_field_modes() {
        let conditional = parse(json!({
            "id": "c",
            "name": "Conditional",
            "ruleType": "crossField",
            "target": { "field": "*" },
            "configuration": {
                "type": "conditional",
                "conditionField": "country",
                "conditionValue": "US",
                "targetField": "zip",
                "targetCondition": { "type": "format", "pattern": "^\\d{5}$" }
            }
        }));
        let RuleConfig::CrossField(CrossFieldConfig::Typed(CrossFieldMode::Conditional(cfg))) =
            conditional.config
        else {
            panic!("expected conditional mode");
        };
        assert_eq!(cfg.condition_operator, ConditionOperator::Equals);
        assert_eq!(
            cfg.target_condition.and_then(|t| t.kind),
            Some(TargetConditionKind::Format)
        );

        let business = parse(json!({
            "id": "b",
            "name": "Business",
            "ruleType": "crossField",
            "target": { "field": "age" },
            "configuration": { "type": "businessRule", "businessRule": "minors-consent" }
        }));
        assert_eq!(
            business.config,
            RuleConfig::CrossField(CrossFieldConfig::Typed(CrossFieldMode::BusinessRule(
                BusinessRuleConfig {
                    business_rule: Some(BusinessRule::MinorsConsent),
                }
            )))
        );

        let legacy = parse(json!({
            "id": "l",
            "name": "Legacy",
            "ruleType": "crossField",
            "target": { "field": "endDate" },
            "configuration": { "dependentField": "age", "condition": ">= 18" }
        }));
        assert_eq!(
            legacy.config,
            RuleConfig::CrossField(CrossFieldConfig::Legacy(LegacyConfig {
                dependent_field: Some("age".into()),
                condition: Some(">= 18".into()),
            }))
        );
    }

    #[test]
    fn test_serialization_restores_wire_shape() {
        let rule = parse(json!({
            "id": "f",
            "name": "Format",
            "ruleType": "format",
            "target": { "field": "email" },
            "configuration": { "dataType": "email" },
            "severity": "warning",
            "enabled": false
        }));

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "f",
                "name": "Format",
                "ruleType": "format",
                "target": { "field": "email" },
                "configuration": { "dataType": "email" },
                "severity": "warning",
                "enabled": false
            })
        );
    }
}
