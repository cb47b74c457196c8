//! Rule store abstraction.
//!
//! Rule sets are authored and persisted outside the engine. A surrounding
//! service loads them once through a [`RuleStore`] and hands them to the
//! engine; the engine itself never talks to a store.

use crate::{Result, RuleDefinition};

/// Source and sink of rule definitions.
///
/// Implementations are responsible for rejecting malformed rule shapes; the
/// engine accepts whatever it is given.
///
/// # Example
///
/// ```rust
/// use rules_core::{Result, RuleDefinition, RuleStore};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct MemoryStore(Mutex<Vec<RuleDefinition>>);
///
/// impl RuleStore for MemoryStore {
///     fn load_rules(&self) -> Result<Vec<RuleDefinition>> {
///         Ok(self.0.lock().unwrap().clone())
///     }
///
///     fn save_rules(&self, rules: &[RuleDefinition]) -> Result<()> {
///         *self.0.lock().unwrap() = rules.to_vec();
///         Ok(())
///     }
/// }
///
/// let store = MemoryStore::default();
/// store.save_rules(&[]).unwrap();
/// assert!(store.load_rules().unwrap().is_empty());
/// ```
pub trait RuleStore: Send + Sync {
    /// Loads the complete rule set.
    fn load_rules(&self) -> Result<Vec<RuleDefinition>>;

    /// Replaces the stored rule set.
    fn save_rules(&self, rules: &[RuleDefinition]) -> Result<()>;
}
