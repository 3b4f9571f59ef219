// src/shell/mod.rs

//! Minimal command execution facility.
//!
//! A [`Command`] is bound to a [`Target`] and driven through two steps:
//!
//! - `start`: synchronous; either hands back a running [`Process`] or fails.
//! - `wait`: asynchronous; resolves to the process output or a failure and
//!   observes the caller's `CancellationToken` while it is outstanding.
//!
//! Targets decide what "running" means. This crate ships the stub targets in
//! [`crate::stub`]; a real process backend would implement the same traits.

pub mod command;

use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::{Result, StubError};
use crate::types::{Phase, ProcessState};

pub use command::{canonicalize, Command};

/// Boxed future returned by [`Process::wait`].
pub type WaitFuture = Pin<Box<dyn Future<Output = Result<String>> + Send + 'static>>;

/// Something that can start commands.
pub trait Target: Send + Sync {
    /// Short label used when annotating errors (`On=<name>`).
    fn name(&self) -> &str;

    /// Start `cmd`. Errors returned here mean the process never ran.
    fn start(&self, ctx: &CancellationToken, cmd: &Command) -> Result<Box<dyn Process>>;
}

/// A started command.
pub trait Process: Send {
    /// Wait for the process to finish and return its output.
    ///
    /// Cancellation of `ctx` is only observed while this future is pending.
    fn wait(self: Box<Self>, ctx: CancellationToken) -> WaitFuture;
}

/// Shorthand for `Command::new(name).args(args)`.
pub fn command<I, S>(name: &str, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Command::new(name).args(args)
}

/// A command bound to the target that will run it.
pub struct Invocation<'t> {
    command: Command,
    target: &'t dyn Target,
}

impl<'t> Invocation<'t> {
    pub fn new(command: Command, target: &'t dyn Target) -> Self {
        Self { command, target }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Start the command, wait for it and return its output.
    pub async fn call(self, ctx: &CancellationToken) -> Result<String> {
        let line = self.command.canonical_line();
        info!(
            command = %line,
            target = self.target.name(),
            state = ?ProcessState::NotStarted,
            "starting command"
        );

        let process = self
            .target
            .start(ctx, &self.command)
            .map_err(|err| self.annotate(Phase::Start, &line, err))?;

        let output = process
            .wait(ctx.clone())
            .await
            .map_err(|err| self.annotate(Phase::Wait, &line, err))?;

        debug!(command = %line, output_len = output.len(), "command finished");
        Ok(output)
    }

    /// Like [`call`](Self::call) but discards the output.
    pub async fn run(self, ctx: &CancellationToken) -> Result<()> {
        self.call(ctx).await.map(|_| ())
    }

    fn annotate(&self, phase: Phase, line: &str, err: StubError) -> StubError {
        debug!(command = %line, %phase, error = %err, "command failed");
        StubError::Exec {
            phase,
            command: line.to_string(),
            target: self.target.name().to_string(),
            source: Box::new(err),
        }
    }
}
