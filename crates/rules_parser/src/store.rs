//! File-backed rule store.

use crate::{FileFormat, ParserError, Result, detect_format, parse_rules, serialize_rules};
use rules_core::{RuleDefinition, RuleError, RuleStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// A [`RuleStore`] over a single JSON, YAML or TOML file.
///
/// # Example
///
/// ```no_run
/// use rules_core::RuleStore;
/// use rules_parser::FileRuleStore;
///
/// let store = FileRuleStore::new("rules/customers.yml").unwrap();
/// let rules = store.load_rules().unwrap();
/// store.save_rules(&rules).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileRuleStore {
    path: PathBuf,
    format: FileFormat,
}

impl FileRuleStore {
    /// Creates a store, picking the format from the file extension.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = detect_format(&path)?;
        Ok(Self { path, format })
    }

    /// Creates a store with an explicit format.
    pub fn with_format(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format of the backing file.
    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl RuleStore for FileRuleStore {
    fn load_rules(&self) -> rules_core::Result<Vec<RuleDefinition>> {
        let rules = std::fs::read_to_string(&self.path)
            .map_err(ParserError::from)
            .and_then(|content| parse_rules(&content, self.format))
            .map_err(|e| RuleError::store(format!("{}: {}", self.path.display(), e)))?;

        info!(path = %self.path.display(), rules = rules.len(), "Loaded rules from file");
        Ok(rules)
    }

    fn save_rules(&self, rules: &[RuleDefinition]) -> rules_core::Result<()> {
        let content = serialize_rules(rules, self.format)
            .map_err(|e| RuleError::store(format!("{}: {}", self.path.display(), e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| RuleError::store(format!("{}: {}", self.path.display(), e)))?;

        info!(path = %self.path.display(), rules = rules.len(), "Saved rules to file");
        Ok(())
    }
}
