// src/stub/mod.rs

//! Stub targets: resolve commands against rules instead of running them.
//!
//! - [`matcher`] defines the rule variants (exact, regex, echo).
//! - [`one_of`] composes rules with first-match-wins semantics.
//! - [`response`] describes what a matched command does.
//! - [`target`] plugs all of the above into the [`crate::shell`] facility and
//!   simulates the start and wait phases.
//!
//! ```no_run
//! use cmdstub::shell::command;
//! use cmdstub::stub::{echo, one_of, respond_to};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> cmdstub::errors::Result<()> {
//! let ctx = CancellationToken::new();
//! let target = one_of([
//!     respond_to(r#"echo "Hello from the shell""#, "Nice to meet you"),
//!     echo(),
//! ]);
//! let out = command("echo", ["Hello from the shell"]).on(&target).call(&ctx).await?;
//! assert_eq!(out, "Nice to meet you");
//! # Ok(())
//! # }
//! ```

pub mod matcher;
pub mod one_of;
pub mod response;
pub mod target;

pub use matcher::{echo, matching, regex, respond_to, Matcher};
pub use one_of::{one_of, OneOf};
pub use response::{respond, CancelHook, Cancellation, Response};
pub use target::{StubProcess, STUB_TARGET_NAME};
