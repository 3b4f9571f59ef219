// src/stub/target.rs

//! Glue between rules and the execution facility.
//!
//! Every rule type is a [`Target`]: a bare [`Response`] answers every command,
//! a [`Matcher`] answers the commands it matches, and [`OneOf`] tries its
//! rules in order. Starting a command resolves its response immediately; the
//! returned [`StubProcess`] then simulates the wait phase.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::errors::{Result, StubError};
use crate::shell::{Command, Process, Target, WaitFuture};
use crate::types::ProcessState;

use super::matcher::Matcher;
use super::one_of::OneOf;
use super::response::{Cancellation, Response};

/// Label reported by every stub target.
pub const STUB_TARGET_NAME: &str = "stub";

impl Target for OneOf {
    fn name(&self) -> &str {
        STUB_TARGET_NAME
    }

    fn start(&self, _ctx: &CancellationToken, cmd: &Command) -> Result<Box<dyn Process>> {
        start_with(self.resolve(cmd), cmd)
    }
}

impl Target for Matcher {
    fn name(&self) -> &str {
        STUB_TARGET_NAME
    }

    fn start(&self, _ctx: &CancellationToken, cmd: &Command) -> Result<Box<dyn Process>> {
        start_with(self.match_command(cmd), cmd)
    }
}

impl Target for Response {
    fn name(&self) -> &str {
        STUB_TARGET_NAME
    }

    fn start(&self, _ctx: &CancellationToken, cmd: &Command) -> Result<Box<dyn Process>> {
        start_with(Some(self.clone()), cmd)
    }
}

/// Turn a resolved (or missing) response into the start-phase outcome.
fn start_with(response: Option<Response>, cmd: &Command) -> Result<Box<dyn Process>> {
    let command = cmd.canonical_line();
    trace!(command = %command, state = ?ProcessState::Starting, "resolving response");

    let Some(response) = response else {
        debug!(command = %command, state = ?ProcessState::StartFailed, "unmatched command");
        return Err(StubError::UnmatchedCommand { command });
    };

    if let Some(err) = &response.start_err {
        debug!(command = %command, state = ?ProcessState::StartFailed, error = %err, "declared start failure");
        return Err(StubError::Start(err.clone()));
    }

    debug!(
        command = %command,
        state = ?ProcessState::Running,
        cancellable = response.is_cancellable(),
        "stub process started"
    );
    Ok(Box::new(StubProcess { command, response }))
}

/// A simulated process in the `Running` state.
#[derive(Debug)]
pub struct StubProcess {
    command: String,
    response: Response,
}

impl Process for StubProcess {
    fn wait(self: Box<Self>, ctx: CancellationToken) -> WaitFuture {
        Box::pin(async move { self.finish(ctx).await })
    }
}

impl StubProcess {
    async fn finish(self, ctx: CancellationToken) -> Result<String> {
        let Response {
            output,
            wait_err,
            blocking,
            ..
        } = self.response;

        let cancelled = match blocking {
            Some(cancellation) => block(&self.command, cancellation, &ctx).await,
            None => false,
        };

        let state = match (&wait_err, cancelled) {
            (_, true) => ProcessState::Cancelled,
            (Some(_), false) => ProcessState::WaitFailed,
            (None, false) => ProcessState::Completed,
        };
        debug!(command = %self.command, ?state, "stub process finished");

        match wait_err {
            Some(err) => Err(StubError::Wait(err)),
            None => Ok(output),
        }
    }
}

/// Block until the waiter resolves, calling the cancel hook at most once if
/// `ctx` is cancelled first. Returns whether the hook ran.
///
/// The signal itself is never resolved here; only the hook or an external
/// resolver can do that.
async fn block(command: &str, cancellation: Cancellation, ctx: &CancellationToken) -> bool {
    let Cancellation { waiter, on_cancel } = cancellation;

    tokio::select! {
        biased;

        _ = waiter.wait() => {
            debug!(command, "wait signal resolved");
            false
        }

        _ = ctx.cancelled() => {
            if waiter.is_resolved() {
                debug!(command, "context cancelled after the signal resolved; ignoring");
                return false;
            }
            info!(command, "context cancelled while waiting; invoking cancel hook");
            on_cancel();
            waiter.wait().await;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Failure;
    use crate::shell::command;
    use crate::signal::new_signal;
    use crate::stub::matcher::{echo, matching};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn plain_response_completes_immediately() {
        let ctx = CancellationToken::new();
        let process = Response::with_output("done")
            .start(&ctx, &command("anything", ["at", "all"]))
            .unwrap();
        assert_eq!(process.wait(ctx).await.unwrap(), "done");
    }

    #[tokio::test]
    async fn start_error_wins_over_everything_else() {
        let ctx = CancellationToken::new();
        let (response, _resolver) = Response::start_failure(Failure::msg("nope"))
            .wait_err(Failure::msg("never seen"))
            .until_killed();

        match response.start(&ctx, &command("x", ["y"])) {
            Err(StubError::Start(f)) => assert_eq!(f.to_string(), "nope"),
            Err(e) => panic!("expected start failure, got {e:?}"),
            Ok(_) => panic!("expected start failure, got a running process"),
        }
    }

    #[tokio::test]
    async fn unmatched_fails_at_start() {
        let ctx = CancellationToken::new();
        let rules = OneOf::default().push(matching("echo hi", Response::with_output("hi")));
        match rules.start(&ctx, &command("echo", ["Not hi"])) {
            Err(StubError::UnmatchedCommand { command }) => {
                assert_eq!(command, r#"echo "Not hi""#)
            }
            Err(e) => panic!("expected unmatched, got {e:?}"),
            Ok(_) => panic!("expected unmatched, got a running process"),
        }
    }

    #[tokio::test]
    async fn uncancellable_wait_ignores_a_cancelled_context() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        let process = echo().start(&ctx, &command("echo", ["still", "here"])).unwrap();
        assert_eq!(process.wait(ctx).await.unwrap(), "still here");
    }

    #[tokio::test]
    async fn natural_resolution_skips_the_hook() {
        let ctx = CancellationToken::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (waiter, resolver) = new_signal();
        let hook_calls = Arc::clone(&calls);
        let response = Response::with_output("finished").block_on(waiter, move || {
            hook_calls.fetch_add(1, Ordering::SeqCst);
        });

        let process = response.start(&ctx, &command("sleep", ["1"])).unwrap();
        let handle = tokio::spawn(process.wait(ctx.clone()));

        tokio::time::sleep(Duration::from_millis(5)).await;
        resolver.resolve();
        let out = handle.await.unwrap().unwrap();
        ctx.cancel();

        assert_eq!(out, "finished");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn already_resolved_signal_beats_an_already_cancelled_context() {
        let ctx = CancellationToken::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (waiter, resolver) = new_signal();
        resolver.resolve();
        ctx.cancel();

        let hook_calls = Arc::clone(&calls);
        let response = Response::with_output("ok").block_on(waiter, move || {
            hook_calls.fetch_add(1, Ordering::SeqCst);
        });
        let process = response.start(&ctx, &command("true", Vec::<String>::new())).unwrap();

        assert_eq!(process.wait(ctx).await.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancellation_runs_the_hook_once_and_returns_wait_err() {
        let ctx = CancellationToken::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (waiter, resolver) = new_signal();
        let hook_calls = Arc::clone(&calls);
        let response = Response::wait_failure(Failure::msg("Cancelled")).block_on(waiter, move || {
            hook_calls.fetch_add(1, Ordering::SeqCst);
            resolver.resolve();
        });

        let process = response.start(&ctx, &command("echo", ["x"])).unwrap();
        let handle = tokio::spawn(process.wait(ctx.clone()));
        tokio::time::sleep(Duration::from_millis(5)).await;
        ctx.cancel();

        let res = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("wait should finish after cancel")
            .unwrap();
        match res {
            Err(StubError::Wait(f)) => assert_eq!(f.to_string(), "Cancelled"),
            other => panic!("expected wait failure, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hook_that_does_not_resolve_keeps_the_process_blocked() {
        let ctx = CancellationToken::new();
        let (waiter, resolver) = new_signal();
        let response = Response::with_output("late").block_on(waiter, || {});

        let process = response.start(&ctx, &command("daemon", Vec::<String>::new())).unwrap();
        let handle = tokio::spawn(process.wait(ctx.clone()));
        ctx.cancel();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        resolver.resolve();
        let out = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("external resolve should unblock")
            .unwrap()
            .unwrap();
        assert_eq!(out, "late");
    }
}
