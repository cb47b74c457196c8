//! # Rules Core
//!
//! Core data structures for the rule validation engine.
//!
//! A rule set is a list of declarative [`RuleDefinition`]s. Each rule targets
//! one or more fields of a flat [`Record`] through a wildcard pattern and
//! carries a configuration whose shape depends on its kind. Validating a
//! record produces one [`ValidationResult`] per (rule, matched field) pair.
//!
//! ## Key Concepts
//!
//! - **RuleDefinition**: identity, target pattern, severity and typed configuration
//! - **RuleConfig**: one variant per rule kind (format, range, completeness,
//!   uniqueness, crossField, custom)
//! - **Record**: insertion-ordered mapping of field names to scalar [`DataValue`]s
//! - **ValidationReport**: results grouped into errors and warnings with statistics
//!
//! ## Example
//!
//! ```rust
//! use rules_core::{RangeConfig, RuleBuilder, RuleConfig};
//!
//! let rule = RuleBuilder::new("age-range", "Age range")
//!     .target("age")
//!     .config(RuleConfig::Range(RangeConfig {
//!         min: Some(0.0),
//!         max: Some(150.0),
//!         ..Default::default()
//!     }))
//!     .build();
//!
//! assert_eq!(rule.rule_type(), "range");
//! assert!(rule.enabled);
//! ```

pub mod builder;
pub mod error;
pub mod result;
pub mod rule;
pub mod store;
pub mod value;

pub use builder::*;
pub use error::*;
pub use result::*;
pub use rule::*;
pub use store::*;
pub use value::*;
