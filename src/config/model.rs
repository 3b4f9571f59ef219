// src/config/model.rs

use serde::Deserialize;

/// A rule file as read from TOML, before validation.
///
/// ```toml
/// [[rule]]
/// exact = 'echo "Hello from the shell"'
/// output = "Nice to meet you"
///
/// [[rule]]
/// regex = "smalltalk"
/// output = "Nice to meet you"
///
/// [[rule]]
/// exact = "echo Goodbye"
/// start_error = "bad command"
///
/// [[rule]]
/// echo = true
/// ```
///
/// Rules keep their declaration order; it is the only tie-break.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRuleFile {
    #[serde(default)]
    pub rule: Vec<RuleConfig>,
}

/// One `[[rule]]` table.
///
/// Exactly one of `exact`, `regex` or `echo = true` must be set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Canonical command line to match verbatim.
    pub exact: Option<String>,

    /// Regular expression searched for in the canonical command line.
    pub regex: Option<String>,

    /// Catch-all that answers like `echo`.
    #[serde(default)]
    pub echo: bool,

    /// Output returned by a successful wait.
    pub output: Option<String>,

    /// If set, the command fails to start with this message.
    pub start_error: Option<String>,

    /// If set, the command starts but the wait fails with this message.
    pub wait_error: Option<String>,
}
