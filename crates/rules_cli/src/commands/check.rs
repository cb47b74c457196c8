use anyhow::{Context, Result};
use rules_core::{RuleConfig, RuleDefinition};
use rules_engine::{PatternCache, TargetMatcher, rule_pattern};
use rules_parser::parse_rules_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(rules_path: &str, format: &str) -> Result<()> {
    info!("Checking rules: {}", rules_path);

    let path = Path::new(rules_path);
    let rules = parse_rules_file(path)
        .with_context(|| format!("Failed to parse rules file: {}", rules_path))?;

    let issues = find_issues(&rules);
    output::print_rule_summary(&rules, &issues, format)?;

    if !issues.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

/// Problems that would make rules fail on every record they match.
fn find_issues(rules: &[RuleDefinition]) -> Vec<String> {
    let patterns = PatternCache::compile(rules);
    let mut issues = Vec::new();

    for rule in rules {
        if let RuleConfig::Unknown { rule_type, .. } = &rule.config {
            issues.push(format!("[{}] Unknown rule type: {}", rule.id, rule_type));
        }

        if let Some(error) = rule_pattern(rule).and_then(|pattern| patterns.error(pattern)) {
            issues.push(format!("[{}] Invalid regex pattern: {}", rule.id, error));
        }

        if matches!(TargetMatcher::new(&rule.target.field), TargetMatcher::Invalid) {
            issues.push(format!(
                "[{}] Invalid target pattern: {}",
                rule.id, rule.target.field
            ));
        }
    }

    issues
}
