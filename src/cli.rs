// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `cmdstub`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cmdstub",
    version,
    about = "Resolve a command line against stub rules instead of running it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the rule file (TOML).
    ///
    /// Default: `$CMDSTUB_RULES`, else `Stubs.toml` in the current directory.
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CMDSTUB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the rules and print them, without resolving a command.
    #[arg(long)]
    pub check: bool,

    /// Program and arguments to resolve, e.g. `-- echo "Hello there"`.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
