//! Tests for reading and writing rule files through `FileRuleStore`.

use pretty_assertions::assert_eq;
use rules_core::{
    CompletenessConfig, RangeConfig, RuleBuilder, RuleConfig, RuleDefinition, RuleError, RuleStore,
};
use rules_parser::{FileFormat, FileRuleStore, ParserError, parse_record_file, parse_rules_file};
use std::fs;
use tempfile::TempDir;

fn sample_rules() -> Vec<RuleDefinition> {
    vec![
        RuleBuilder::new("name", "Name required")
            .description("Every customer has a name")
            .target("name")
            .config(RuleConfig::Completeness(CompletenessConfig {
                required: true,
                not_empty: true,
                min_length: Some(2),
            }))
            .build(),
        RuleBuilder::new("age", "Age range")
            .target("age")
            .config(RuleConfig::Range(RangeConfig {
                min: Some(0.0),
                max: Some(150.0),
                inclusive: false,
            }))
            .severity("warning")
            .enabled(false)
            .build(),
    ]
}

#[test]
fn test_save_then_load_each_format() {
    let dir = TempDir::new().unwrap();

    for file in ["rules.json", "rules.yaml", "rules.toml"] {
        let store = FileRuleStore::new(dir.path().join(file)).unwrap();
        store.save_rules(&sample_rules()).unwrap();

        let loaded = store.load_rules().unwrap();
        assert_eq!(loaded, sample_rules(), "{}", file);
    }
}

#[test]
fn test_store_format_from_extension() {
    let store = FileRuleStore::new("rules/customers.yml").unwrap();
    assert_eq!(store.format(), FileFormat::Yaml);

    let err = FileRuleStore::new("rules/customers.csv").unwrap_err();
    assert!(matches!(err, ParserError::UnsupportedFormat(ext) if ext == "csv"));
}

#[test]
fn test_explicit_format_ignores_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.txt");
    fs::write(
        &path,
        r#"[{ "id": "r1", "name": "Rule", "ruleType": "uniqueness", "target": { "field": "email" } }]"#,
    )
    .unwrap();

    let store = FileRuleStore::with_format(&path, FileFormat::Json);
    let rules = store.load_rules().unwrap();
    assert_eq!(rules[0].rule_type(), "uniqueness");
}

#[test]
fn test_missing_file_is_store_error() {
    let dir = TempDir::new().unwrap();
    let store = FileRuleStore::new(dir.path().join("absent.json")).unwrap();

    let err = store.load_rules().unwrap_err();
    assert!(matches!(err, RuleError::Store(_)));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_parse_files_by_extension() {
    let dir = TempDir::new().unwrap();

    let rules_path = dir.path().join("rules.yml");
    fs::write(
        &rules_path,
        r#"
- id: email
  name: Email format
  ruleType: format
  target:
    field: "*email*"
  configuration:
    dataType: email
"#,
    )
    .unwrap();
    let rules = parse_rules_file(&rules_path).unwrap();
    assert_eq!(rules[0].target.field, "*email*");

    let record_path = dir.path().join("record.toml");
    fs::write(&record_path, "email = \"a@b.co\"\nage = 36\n").unwrap();
    let record = parse_record_file(&record_path).unwrap();
    let fields: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["email", "age"]);
}
