use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the rulecheck binary
#[allow(deprecated)]
fn rulecheck() -> Command {
    Command::cargo_bin("rulecheck").expect("Failed to find rulecheck binary")
}

fn json_output(cmd: &mut Command, success: bool) -> serde_json::Value {
    let assert = cmd.assert();
    let assert = if success {
        assert.success()
    } else {
        assert.failure()
    };
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Output should be valid JSON ({}): {}", e, stdout))
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_valid_rules() {
    rulecheck()
        .arg("check")
        .arg(fixture_path("customer_rules.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("6 rules (5 enabled)"))
        .stdout(predicate::str::contains("email-format"))
        .stdout(predicate::str::contains("crossField"))
        .stdout(predicate::str::contains("Rule set is valid"));
}

#[test]
fn test_check_json_and_toml_rules() {
    rulecheck()
        .arg("check")
        .arg(fixture_path("customer_rules.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rules"));

    rulecheck()
        .arg("check")
        .arg(fixture_path("customer_rules.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("age-range"));
}

#[test]
fn test_check_reports_issues() {
    rulecheck()
        .arg("check")
        .arg(fixture_path("broken_rules.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("[sku-format] Invalid regex pattern"))
        .stdout(predicate::str::contains("[checksum] Unknown rule type: checksum"))
        .stderr(predicate::str::contains("2 issue(s)"));
}

#[test]
fn test_check_json_output() {
    let output = json_output(
        rulecheck()
            .arg("check")
            .arg("--format")
            .arg("json")
            .arg(fixture_path("broken_rules.yml")),
        false,
    );

    assert_eq!(output["valid"], false);
    assert_eq!(output["rules"].as_array().map(Vec::len), Some(2));
    assert_eq!(output["rules"][1]["ruleType"], "checksum");
    assert_eq!(output["issues"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_check_invalid_rules() {
    rulecheck()
        .arg("check")
        .arg(fixture_path("invalid_rules.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("missing-name"));
}

#[test]
fn test_check_missing_file() {
    rulecheck()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_passing_record() {
    rulecheck()
        .arg("validate")
        .arg(fixture_path("customer_rules.yml"))
        .arg(fixture_path("valid_customer.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("Rules evaluated: 5"));
}

#[test]
fn test_validate_failing_record() {
    rulecheck()
        .arg("validate")
        .arg(fixture_path("customer_rules.yml"))
        .arg(fixture_path("invalid_customer.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains(
            "[email-format] email: Value 'not-an-email' is not a valid email address",
        ))
        .stdout(predicate::str::contains(
            "[age-range] age: Value 200 is above the inclusive maximum of 150",
        ));
}

#[test]
fn test_validate_warnings_do_not_fail() {
    rulecheck()
        .arg("validate")
        .arg(fixture_path("customer_rules.yml"))
        .arg(fixture_path("warning_customer.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Warnings:"))
        .stdout(predicate::str::contains(
            "Value 'call me maybe' is not a valid phone number",
        ));
}

#[test]
fn test_validate_json_output() {
    let output = json_output(
        rulecheck()
            .arg("validate")
            .arg("--format")
            .arg("json")
            .arg(fixture_path("customer_rules.json"))
            .arg(fixture_path("invalid_customer.json")),
        false,
    );

    assert_eq!(output["passed"], false);
    assert_eq!(output["summary"]["error_count"], 2);
    let results = output["results"].as_array().expect("results should be a list");
    assert_eq!(results.len(), 3);
    assert_eq!(results[1]["ruleId"], "email-format");
    assert_eq!(results[1]["value"], "not-an-email");
}

#[test]
fn test_validate_show_passed() {
    rulecheck()
        .arg("validate")
        .arg("--show-passed")
        .arg(fixture_path("customer_rules.toml"))
        .arg(fixture_path("valid_customer.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Passed:"))
        .stdout(predicate::str::contains("[name-required] name"));
}

#[test]
fn test_validate_missing_record() {
    rulecheck()
        .arg("validate")
        .arg(fixture_path("customer_rules.yml"))
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse record file"));
}

#[test]
fn test_validate_nested_record() {
    let temp_dir = TempDir::new().unwrap();
    let record = temp_dir.path().join("nested.json");
    fs::write(&record, r#"{ "address": { "city": "Rome" } }"#).unwrap();

    rulecheck()
        .arg("validate")
        .arg(fixture_path("customer_rules.yml"))
        .arg(record.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nested value"));
}

#[test]
fn test_validate_empty_rules_file() {
    let temp_dir = TempDir::new().unwrap();
    let empty = temp_dir.path().join("empty.yml");
    fs::write(&empty, "").unwrap();

    rulecheck()
        .arg("validate")
        .arg(empty.to_str().unwrap())
        .arg(fixture_path("valid_customer.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_validate_with_invalid_format() {
    rulecheck()
        .arg("validate")
        .arg("--format")
        .arg("xml")
        .arg(fixture_path("customer_rules.yml"))
        .arg(fixture_path("valid_customer.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ============================================================================
// General CLI tests
// ============================================================================

#[test]
fn test_cli_help() {
    rulecheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_cli_version() {
    rulecheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_help() {
    rulecheck()
        .arg("validate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("record"))
        .stdout(predicate::str::contains("format"));
}
