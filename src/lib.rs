// src/lib.rs

//! Command-execution stub engine.
//!
//! Commands built with [`shell::command`] are started on a [`shell::Target`].
//! The targets in [`stub`] never spawn a process: they resolve the command's
//! canonical line against ordered rules and replay the declared response,
//! including start failures, wait failures and cooperative cancellation.

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod shell;
pub mod signal;
pub mod stub;
pub mod types;

use anyhow::{bail, Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{default_rules_path, load_and_validate};
use crate::shell::Command;
use crate::stub::OneOf;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the rule file, then either prints the rules
/// (`--check`) or resolves the trailing command through the stub target and
/// returns its output.
pub async fn run(args: CliArgs) -> Result<Option<String>> {
    let rules_path = args.rules.clone().unwrap_or_else(default_rules_path);
    let rules = load_and_validate(&rules_path)
        .with_context(|| format!("loading rules from {}", rules_path.display()))?;
    info!(path = %rules_path.display(), rules = rules.len(), "rules loaded");

    if args.check {
        print_check(&rules);
        return Ok(None);
    }

    let Some((name, rest)) = args.command.split_first() else {
        bail!("no command given; pass one after `--`, e.g. `cmdstub -- echo hi`");
    };

    let ctx = CancellationToken::new();
    let output = Command::new(name.as_str())
        .args(rest.iter().cloned())
        .on(&rules)
        .call(&ctx)
        .await?;

    Ok(Some(output))
}

/// `--check` output: rules in the order they are tried.
fn print_check(rules: &OneOf) {
    for line in check_report(rules) {
        println!("{line}");
    }
    debug!("check complete (no command resolved)");
}

fn check_report(rules: &OneOf) -> Vec<String> {
    let mut lines = vec![
        "cmdstub check".to_string(),
        format!("rules ({}):", rules.len()),
    ];
    lines.extend(
        rules
            .matchers()
            .iter()
            .enumerate()
            .map(|(index, matcher)| format!("  {}. {}", index + 1, matcher.describe())),
    );
    lines
}
