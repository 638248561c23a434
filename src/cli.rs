// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the `runpad` scenario harness.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runpad",
    version,
    about = "Replay a widget-event scenario through a code-runner session.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the scenario file (TOML).
    ///
    /// Default: `Runpad.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Runpad.toml")]
    pub scenario: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNPAD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the scenario, but don't replay it.
    #[arg(long)]
    pub dry_run: bool,
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
