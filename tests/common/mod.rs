#![allow(dead_code)]

pub use cmdstub_test_utils::builders;
pub use cmdstub_test_utils::{cancel_after, init_tracing, with_timeout};

use cmdstub::errors::{Result, StubError};
use cmdstub::shell::{command, Target};
use tokio_util::sync::CancellationToken;

/// `call` a command with no cancellation in play.
pub async fn call(target: &dyn Target, name: &str, args: &[&str]) -> Result<String> {
    let ctx = CancellationToken::new();
    command(name, args.iter().copied()).on(target).call(&ctx).await
}

/// Unwrap the facility annotation and return (phase, root error).
pub fn split_exec(err: &StubError) -> (cmdstub::types::Phase, &StubError) {
    match err {
        StubError::Exec { phase, .. } => (*phase, err.root()),
        other => panic!("expected an annotated Exec error, got {other:?}"),
    }
}
