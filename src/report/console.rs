//! Line-oriented console report.
//!
//! ```text
//! ✅ Positive numbers
//! ❌ Neg + Pos: expected 0, got 1
//! ❌ Zeros: attempt to divide by zero
//!
//! Results: 1 passed, 2 failed
//! ```
//!
//! Every faulted case also gets a diagnostic block (kind, message, location, backtrace) on the diagnostic writer,
//! stderr in the binary, so stdout stays the report.

use std::io::{self, Stderr, Stdout, Write};

use kata_core::{CaseOutcome, CaseReport, LoadError, RunSummary};

use super::{CaseReporter, MarkerStyle, write_fault_diagnostics};

/// Shown instead of expected/actual values for hidden cases.
const HIDDEN_MISMATCH: &str = "hidden case";

pub struct ConsoleReporter<W: Write, E: Write> {
    out: W,
    diag: E,
    markers: MarkerStyle,
}

impl ConsoleReporter<Stdout, Stderr> {
    /// Report to stdout, diagnostics to stderr.
    pub fn stdio(markers: MarkerStyle) -> Self {
        Self::new(io::stdout(), io::stderr(), markers)
    }
}

impl<W: Write, E: Write> ConsoleReporter<W, E> {
    pub fn new(out: W, diag: E, markers: MarkerStyle) -> Self {
        Self { out, diag, markers }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.diag)
    }

    fn case_line(&self, report: &CaseReport) -> String {
        let label = &report.label;
        match &report.outcome {
            CaseOutcome::Passed => format!("{} {label}", self.markers.pass()),
            CaseOutcome::Failed { .. } if report.hidden => {
                format!("{} {label}: {HIDDEN_MISMATCH}", self.markers.fail())
            }
            CaseOutcome::Failed { expected, actual } => {
                format!("{} {label}: expected {expected}, got {actual}", self.markers.fail())
            }
            CaseOutcome::Errored(fault) => format!("{} {label}: {fault}", self.markers.fail()),
        }
    }
}

impl<W: Write, E: Write> CaseReporter for ConsoleReporter<W, E> {
    fn on_load_failure(&mut self, error: &LoadError) -> io::Result<()> {
        writeln!(self.out, "FAIL: {error}")?;
        self.out.flush()
    }

    fn on_case_complete(&mut self, report: &CaseReport) -> io::Result<()> {
        writeln!(self.out, "{}", self.case_line(report))?;
        self.out.flush()?;

        if let CaseOutcome::Errored(fault) = &report.outcome {
            write_fault_diagnostics(&mut self.diag, &report.label, fault)?;
        }
        Ok(())
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Results: {} passed, {} failed", summary.passed, summary.failed)?;
        self.out.flush()
    }
}
