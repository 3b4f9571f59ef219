// src/errors.rs

//! Crate-wide error type and the author-declared `Failure` payload.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::types::Phase;

#[derive(Error, Debug)]
pub enum StubError {
    /// A regex rule whose pattern does not compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No rule in the active dispatcher matched the command line.
    #[error("unmatched:{command}")]
    UnmatchedCommand { command: String },

    /// The resolved response declares a start failure.
    #[error(transparent)]
    Start(Failure),

    /// The resolved response declares a failure while waiting.
    #[error(transparent)]
    Wait(Failure),

    /// A target failure annotated by the execution facility.
    #[error("{phase}:{source}:Command={command},On={target}")]
    Exec {
        phase: Phase,
        command: String,
        target: String,
        #[source]
        source: Box<StubError>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl StubError {
    /// The lifecycle phase this error surfaced in, if any.
    ///
    /// Construction and configuration errors happen before a command exists
    /// and report `None`.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            StubError::UnmatchedCommand { .. } | StubError::Start(_) => Some(Phase::Start),
            StubError::Wait(_) => Some(Phase::Wait),
            StubError::Exec { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Strip facility annotations and return the error the target produced.
    pub fn root(&self) -> &StubError {
        match self {
            StubError::Exec { source, .. } => source.root(),
            other => other,
        }
    }
}

/// An error declared by a test author inside a `Response`.
///
/// Responses are reused for every command a rule matches, so the payload is
/// shared rather than moved out on each failure.
#[derive(Clone)]
pub struct Failure(Arc<anyhow::Error>);

impl Failure {
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(anyhow::Error::msg(message)))
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Self(Arc::new(err))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let inner: &(dyn std::error::Error + 'static) = &**self.0;
        inner.source()
    }
}

pub type Result<T> = std::result::Result<T, StubError>;
