use anyhow::{Context, Result};
use rules_engine::RuleEngine;
use rules_parser::{parse_record_file, parse_rules_file};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(rules_path: &str, record_path: &str, format: &str, show_passed: bool) -> Result<()> {
    info!("Validating record: {}", record_path);
    info!("Rules: {}", rules_path);

    let rules = parse_rules_file(Path::new(rules_path))
        .with_context(|| format!("Failed to parse rules file: {}", rules_path))?;
    let record = parse_record_file(Path::new(record_path))
        .with_context(|| format!("Failed to parse record file: {}", record_path))?;

    if format == "text" {
        output::print_info(&format!(
            "Loaded {} rules ({} enabled) and a record with {} fields",
            rules.len(),
            rules.iter().filter(|r| r.enabled).count(),
            record.len()
        ));
    }

    let engine = RuleEngine::new();
    engine.load_rules(rules);
    let report = engine.validate_report(&record);

    output::print_validation_report(&report, format, show_passed)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
