//! CLI module for the kata verifier
//!
//! ## Commands
//!
//! - `run <EXERCISE>` - Verify the registered solution of an exercise
//! - `list` - Show the exercise catalog (text table or JSON)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::process;

use clap::{Parser, Subcommand};
use kata_core::SolutionRegistry;
use kata_exercises::{Catalog, reference};

use crate::report::{MarkerStyle, ReportFormat};
use crate::version::KATA_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Verify single-function exercise solutions against their fixed case tables
#[derive(Parser, Debug)]
#[command(name = "kata")]
#[command(version = KATA_VERSION)]
#[command(about = "Verify single-function exercise solutions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every case of an exercise against its registered solution
    Run {
        /// Exercise name (see `kata list`)
        #[arg(value_name = "EXERCISE")]
        exercise: String,
        /// Per-case time limit in milliseconds (clamped to 1000..=60000)
        #[arg(long = "timeout-ms", value_name = "MS", conflicts_with = "no_timeout")]
        timeout_ms: Option<u64>,
        /// Run cases inline with no time limit
        #[arg(long)]
        no_timeout: bool,
        /// Do not capture backtraces for panicking cases
        #[arg(long)]
        no_trace: bool,
        /// Use PASS/FAIL instead of emoji markers
        #[arg(long)]
        plain: bool,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// List available exercises
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point, verifying the bundled reference solutions.
pub fn run() {
    run_with(&Catalog::builtin(), &reference::solutions());
}

/// CLI entry point for a solution provider with its own registry (and, optionally, its own catalog).
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run_with(catalog: &Catalog, solutions: &SolutionRegistry) {
    let cli = Cli::parse();

    match execute(cli, catalog, solutions) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli, catalog: &Catalog, solutions: &SolutionRegistry) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run {
            exercise,
            timeout_ms,
            no_timeout,
            no_trace,
            plain,
            format,
        } => {
            let options = commands::RunOptions {
                timeout_ms,
                no_timeout,
                capture_traces: !no_trace,
                markers: if plain { MarkerStyle::Plain } else { MarkerStyle::Emoji },
                format,
            };
            commands::run_exercise(catalog, solutions, &exercise, &options)
        }
        Command::List { format } => commands::list_exercises(catalog, format),
    }
}

// ============================================================================
// Tests
// ============================================================================
