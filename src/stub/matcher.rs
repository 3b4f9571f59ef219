// src/stub/matcher.rs

use std::fmt;

use regex::Regex;

use crate::errors::{Result, StubError};
use crate::shell::Command;

use super::response::Response;

/// A single stub rule.
///
/// - `Exact`: the canonical command line equals `pattern`.
/// - `Regex`: `regex` finds a match anywhere in the canonical line.
/// - `Echo`: matches everything and answers with the arguments joined by
///   spaces, like the real `echo` would.
#[derive(Clone)]
pub enum Matcher {
    Exact { pattern: String, response: Response },
    Regex { regex: Regex, response: Response },
    Echo,
}

impl Matcher {
    pub fn exact(pattern: impl Into<String>, response: impl Into<Response>) -> Self {
        Matcher::Exact {
            pattern: pattern.into(),
            response: response.into(),
        }
    }

    pub fn regex(pattern: &str, response: impl Into<Response>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| StubError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Matcher::Regex {
            regex,
            response: response.into(),
        })
    }

    /// Resolve `cmd` against this rule.
    pub fn match_command(&self, cmd: &Command) -> Option<Response> {
        self.match_line(cmd, &cmd.canonical_line())
    }

    /// Same as [`match_command`](Self::match_command) with the canonical
    /// line already computed.
    pub(crate) fn match_line(&self, cmd: &Command, line: &str) -> Option<Response> {
        match self {
            Matcher::Exact { pattern, response } => {
                (pattern == line).then(|| response.clone())
            }
            Matcher::Regex { regex, response } => {
                regex.is_match(line).then(|| response.clone())
            }
            Matcher::Echo => Some(Response::with_output(cmd.args.join(" "))),
        }
    }

    /// Short human-readable description, used in logs and `--check` output.
    pub fn describe(&self) -> String {
        match self {
            Matcher::Exact { pattern, .. } => format!("exact {pattern:?}"),
            Matcher::Regex { regex, .. } => format!("regex /{}/", regex.as_str()),
            Matcher::Echo => "echo".to_string(),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Exact match answering with a plain output.
pub fn respond_to(pattern: impl Into<String>, output: impl Into<String>) -> Matcher {
    Matcher::exact(pattern, Response::with_output(output))
}

/// Exact match answering with an arbitrary response.
pub fn matching(pattern: impl Into<String>, response: Response) -> Matcher {
    Matcher::exact(pattern, response)
}

/// Regex match answering with an arbitrary response.
pub fn regex(pattern: &str, response: impl Into<Response>) -> Result<Matcher> {
    Matcher::regex(pattern, response)
}

/// Catch-all that behaves like `echo`.
pub fn echo() -> Matcher {
    Matcher::Echo
}
