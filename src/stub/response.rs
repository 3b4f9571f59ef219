// src/stub/response.rs

//! Declared outcomes for stubbed commands.

use std::fmt;
use std::sync::Arc;

use crate::errors::Failure;
use crate::signal::{new_signal, Resolver, Waiter};

/// Hook invoked when the caller cancels a blocked wait.
pub type CancelHook = Arc<dyn Fn() + Send + Sync>;

/// Cancellation wiring for a response that blocks in the wait phase.
///
/// The waiter and the hook travel together: a response either supports
/// cancellation fully or not at all.
#[derive(Clone)]
pub struct Cancellation {
    pub waiter: Waiter,
    pub on_cancel: CancelHook,
}

impl Cancellation {
    pub fn new<F>(waiter: Waiter, on_cancel: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            waiter,
            on_cancel: Arc::new(on_cancel),
        }
    }
}

impl fmt::Debug for Cancellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cancellation")
            .field("waiter", &self.waiter)
            .finish_non_exhaustive()
    }
}

/// The resolved outcome of a matched command.
///
/// - `start_err`: the command fails to start; nothing else is consulted.
/// - `output`: returned by a successful wait.
/// - `wait_err`: returned by the wait instead of `output`.
/// - `blocking`: if set, the wait blocks on the waiter and calls the hook
///   when the caller cancels first.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub start_err: Option<Failure>,
    pub output: String,
    pub wait_err: Option<Failure>,
    pub blocking: Option<Cancellation>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response that succeeds with `output`.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }

    /// A response whose command fails to start.
    pub fn start_failure(err: impl Into<Failure>) -> Self {
        Self {
            start_err: Some(err.into()),
            ..Self::default()
        }
    }

    /// A response whose command starts but fails in the wait phase.
    pub fn wait_failure(err: impl Into<Failure>) -> Self {
        Self {
            wait_err: Some(err.into()),
            ..Self::default()
        }
    }

    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn start_err(mut self, err: impl Into<Failure>) -> Self {
        self.start_err = Some(err.into());
        self
    }

    pub fn wait_err(mut self, err: impl Into<Failure>) -> Self {
        self.wait_err = Some(err.into());
        self
    }

    /// Block the wait phase on `waiter`; run `on_cancel` if the caller
    /// cancels before the waiter resolves.
    pub fn block_on<F>(mut self, waiter: Waiter, on_cancel: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.blocking = Some(Cancellation::new(waiter, on_cancel));
        self
    }

    /// Block the wait phase until killed.
    ///
    /// Cancelling the caller's context resolves the signal, which models a
    /// process that dies when it is killed. The returned resolver lets the
    /// test finish the process itself.
    pub fn until_killed(self) -> (Self, Resolver) {
        let (waiter, resolver) = new_signal();
        let kill = resolver.clone();
        let response = self.block_on(waiter, move || {
            kill.resolve();
        });
        (response, resolver)
    }

    pub fn is_cancellable(&self) -> bool {
        self.blocking.is_some()
    }
}

/// A response that answers with `output`.
///
/// Usable directly as a target that responds to every command.
pub fn respond(output: impl Into<String>) -> Response {
    Response::with_output(output)
}

impl From<&str> for Response {
    fn from(output: &str) -> Self {
        Response::with_output(output)
    }
}

impl From<String> for Response {
    fn from(output: String) -> Self {
        Response::with_output(output)
    }
}
