// src/config/mod.rs

//! Rule files for stub targets.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a rule file from disk (`loader.rs`).
//! - Validate rules and compile them into a `OneOf` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_rules_path, load_and_validate, load_from_path, parse_rules};
pub use model::{RawRuleFile, RuleConfig};
