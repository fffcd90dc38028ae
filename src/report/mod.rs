//! Run reporting.
//!
//! The verifier drives a [`CaseReporter`] through the run lifecycle; reporters decide what reaches the terminal.
//! Two are provided:
//!
//! - [`ConsoleReporter`] - line-oriented text, one line per case, then a `Results:` line
//! - [`JsonReporter`] - a single JSON document written once the run (or the load) is over

pub mod console;
pub mod json;

use std::io::{self, Write};

use clap::ValueEnum;
use kata_core::{CaseReport, Fault, LoadError, RunSummary};

pub use console::ConsoleReporter;
pub use json::JsonReporter;

/// Callbacks for a verification run.
///
/// Either `on_load_failure` is called and nothing else follows, or `on_run_start`, one `on_case_complete` per
/// case in table order, and `on_run_complete`.
pub trait CaseReporter {
    /// Called before the target is looked up
    fn on_load_start(&mut self, _exercise: &str) -> io::Result<()> {
        Ok(())
    }

    /// Called when the target cannot be obtained
    fn on_load_failure(&mut self, error: &LoadError) -> io::Result<()>;

    /// Called once the target is loaded, before the first case
    fn on_run_start(&mut self, _total: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called after each case
    fn on_case_complete(&mut self, report: &CaseReport) -> io::Result<()>;

    /// Called after the last case
    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Write the stderr diagnostic block for a faulted case: `<label>: <kind>: <message>[ at <location>]`, then the
/// backtrace when one was captured.
pub(crate) fn write_fault_diagnostics(diag: &mut dyn Write, label: &str, fault: &Fault) -> io::Result<()> {
    write!(diag, "{label}: {}: {}", fault.kind.as_str(), fault.message)?;
    if let Some(location) = &fault.location {
        write!(diag, " at {location}")?;
    }
    writeln!(diag)?;
    if let Some(trace) = &fault.trace {
        writeln!(diag, "{}", trace.trim_end())?;
    }
    diag.flush()
}

/// Pass/fail markers for the console report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MarkerStyle {
    #[default]
    Emoji,
    Plain,
}

impl MarkerStyle {
    pub fn pass(self) -> &'static str {
        match self {
            MarkerStyle::Emoji => "✅",
            MarkerStyle::Plain => "PASS",
        }
    }

    pub fn fail(self) -> &'static str {
        match self {
            MarkerStyle::Emoji => "❌",
            MarkerStyle::Plain => "FAIL",
        }
    }
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}
