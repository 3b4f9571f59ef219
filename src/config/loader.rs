// src/config/loader.rs

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::RawRuleFile;
use crate::errors::Result;
use crate::stub::OneOf;

/// Environment variable that overrides [`default_rules_path`].
pub const RULES_ENV_VAR: &str = "CMDSTUB_RULES";

/// Rule file used when neither `--rules` nor `$CMDSTUB_RULES` is given.
pub const DEFAULT_RULES_FILE: &str = "Stubs.toml";

/// Read and deserialize a rule file without validating it.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawRuleFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_rules(&contents)
}

/// Deserialize rule-file contents without validating them.
pub fn parse_rules(contents: &str) -> Result<RawRuleFile> {
    let raw: RawRuleFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Load a rule file and compile it into a dispatcher.
///
/// Fails on TOML errors, malformed rules and regex patterns that don't
/// compile.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<OneOf> {
    let raw = load_from_path(path)?;
    OneOf::try_from(raw)
}

/// `$CMDSTUB_RULES` if set, otherwise `Stubs.toml` in the working directory.
pub fn default_rules_path() -> PathBuf {
    rules_path_from(std::env::var_os(RULES_ENV_VAR))
}

fn rules_path_from(env_value: Option<OsString>) -> PathBuf {
    match env_value {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_RULES_FILE),
    }
}
