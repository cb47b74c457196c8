//! # Rules Engine
//!
//! Rule-driven validation of flat records. This crate applies a loaded set of
//! [`RuleDefinition`](rules_core::RuleDefinition)s to a
//! [`Record`](rules_core::Record) and returns one result per (rule, matched
//! field) pair. Supported rule kinds:
//!
//! - Format (built-in data types and regex patterns)
//! - Range (inclusive or exclusive numeric bounds)
//! - Completeness (required, not empty, minimum length)
//! - Uniqueness (within the record)
//! - Cross-field (conditional, comparison, dependency, business rules, legacy expressions)
//! - Custom (functions registered by name)
//!
//! ## Example
//!
//! ```rust
//! use rules_core::{CompletenessConfig, DataValue, Record, RuleBuilder, RuleConfig};
//! use rules_engine::RuleEngine;
//!
//! let engine = RuleEngine::new();
//! engine.load_rules(vec![
//!     RuleBuilder::new("required", "Every field is filled")
//!         .target("*")
//!         .config(RuleConfig::Completeness(CompletenessConfig {
//!             required: true,
//!             not_empty: true,
//!             min_length: None,
//!         }))
//!         .build(),
//! ]);
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), DataValue::from("Ada"));
//! record.insert("email".to_string(), DataValue::from(""));
//!
//! for result in engine.validate(&record) {
//!     if !result.passed {
//!         println!("{}", result.describe());
//!     }
//! }
//! ```

pub mod coercion;
mod completeness;
mod cross_field;
mod custom;
mod dispatch;
mod engine;
mod format;
mod outcome;
mod patterns;
mod range;
pub mod resolver;
mod uniqueness;

pub use completeness::*;
pub use cross_field::*;
pub use custom::*;
pub use dispatch::*;
pub use engine::*;
pub use format::*;
pub use outcome::*;
pub use patterns::*;
pub use range::*;
pub use resolver::{TargetMatcher, resolve};
pub use uniqueness::*;
