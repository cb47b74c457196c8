use anyhow::Result;
use colored::*;
use rules_core::{RuleDefinition, ValidationReport};
use serde_json::json;

pub fn print_validation_report(
    report: &ValidationReport,
    format: &str,
    show_passed: bool,
) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report, show_passed);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport, show_passed: bool) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.red());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    if show_passed {
        let passed: Vec<_> = report.results.iter().filter(|r| r.passed).collect();
        if !passed.is_empty() {
            println!("\n{}", "Passed:".green().bold());
            for result in passed {
                println!("  {} [{}] {}", "✓".green(), result.rule_id, result.field);
            }
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Rules evaluated: {}", report.stats.rules_evaluated);
    println!("  Fields checked:  {}", report.stats.fields_checked);
    println!("  Results:         {}", report.results.len());
    println!("  Passed:          {}", report.passed_count());
    println!("  Total errors:    {}", report.errors.len());
    println!("  Total warnings:  {}", report.warnings.len());
    println!("  Duration:        {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "errors": report.errors,
        "warnings": report.warnings,
        "results": report.results,
        "summary": {
            "rules_evaluated": report.stats.rules_evaluated,
            "fields_checked": report.stats.fields_checked,
            "result_count": report.results.len(),
            "passed_count": report.passed_count(),
            "error_count": report.errors.len(),
            "warning_count": report.warnings.len(),
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_rule_summary(rules: &[RuleDefinition], issues: &[String], format: &str) -> Result<()> {
    if format == "json" {
        let output = json!({
            "valid": issues.is_empty(),
            "rules": rules.iter().map(|rule| json!({
                "id": rule.id,
                "name": rule.name,
                "ruleType": rule.rule_type(),
                "target": rule.target.field,
                "severity": rule.severity,
                "enabled": rule.enabled,
            })).collect::<Vec<_>>(),
            "issues": issues,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let enabled = rules.iter().filter(|r| r.enabled).count();
    print_info(&format!(
        "Rule set loaded: {} rules ({} enabled)",
        rules.len(),
        enabled
    ));

    println!("\nRules:");
    for rule in rules {
        let state = if rule.enabled {
            String::new()
        } else {
            format!(" {}", "(disabled)".dimmed())
        };
        println!(
            "  {:<20} {:<13} {:<20} {}{}",
            rule.id,
            rule.rule_type(),
            rule.target.field,
            rule.severity,
            state
        );
    }
    println!();

    if issues.is_empty() {
        print_success("Rule set is valid");
    } else {
        println!("{}", "Issues:".red().bold());
        for (i, issue) in issues.iter().enumerate() {
            println!("  {}. {}", i + 1, issue.red());
        }
        print_error(&format!("Rule set has {} issue(s)", issues.len()));
    }

    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
