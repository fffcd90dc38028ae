//! JSON report: one document per run, written when the run (or the load) ends.
//!
//! Fault diagnostics (location and backtrace) are not part of the document; they go to the diagnostic writer as
//! each case completes, exactly as in the console report.

use std::io::{self, Stderr, Stdout, Write};

use kata_core::{CaseOutcome, CaseReport, Fault, LoadError, RunSummary};
use serde::Serialize;

use super::{CaseReporter, write_fault_diagnostics};

#[derive(Debug, Serialize)]
struct RunDocument<'a> {
    /// Absent when the reporter was driven without a load step.
    #[serde(skip_serializing_if = "Option::is_none")]
    exercise: Option<&'a str>,
    success: bool,
    exit_code: i32,
    passed: usize,
    failed: usize,
    execution_time_ms: u64,
    timed_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cases: Option<&'a [CaseDocument]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CaseDocument {
    index: usize,
    label: String,
    hidden: bool,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fault: Option<FaultDocument>,
    duration_ms: u64,
}

#[derive(Debug, Serialize)]
struct FaultDocument {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl From<&Fault> for FaultDocument {
    fn from(fault: &Fault) -> Self {
        Self {
            kind: fault.kind.as_str(),
            message: fault.message.clone(),
            location: fault.location.clone(),
        }
    }
}

impl From<&CaseReport> for CaseDocument {
    fn from(report: &CaseReport) -> Self {
        let (expected, actual, fault) = match &report.outcome {
            CaseOutcome::Passed => (None, None, None),
            CaseOutcome::Failed { .. } if report.hidden => (None, None, None),
            CaseOutcome::Failed { expected, actual } => (Some(expected.clone()), Some(actual.clone()), None),
            CaseOutcome::Errored(fault) => (None, None, Some(FaultDocument::from(fault))),
        };
        Self {
            index: report.index,
            label: report.label.clone(),
            hidden: report.hidden,
            status: report.outcome.status_str(),
            expected,
            actual,
            fault,
            duration_ms: report.duration.as_millis() as u64,
        }
    }
}

/// Collects case results and writes a single pretty-printed JSON document.
pub struct JsonReporter<W: Write, E: Write> {
    out: W,
    diag: E,
    exercise: Option<String>,
    cases: Vec<CaseDocument>,
}

impl JsonReporter<Stdout, Stderr> {
    /// Document to stdout, diagnostics to stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> JsonReporter<W, E> {
    pub fn new(out: W, diag: E) -> Self {
        Self {
            out,
            diag,
            exercise: None,
            cases: Vec::new(),
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.diag)
    }

    fn write_document(&mut self, document: &RunDocument<'_>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write, E: Write> CaseReporter for JsonReporter<W, E> {
    fn on_load_start(&mut self, exercise: &str) -> io::Result<()> {
        self.exercise = Some(exercise.to_string());
        Ok(())
    }

    fn on_load_failure(&mut self, error: &LoadError) -> io::Result<()> {
        let exercise = self.exercise.take();
        self.write_document(&RunDocument {
            exercise: exercise.as_deref(),
            success: false,
            exit_code: 1,
            passed: 0,
            failed: 0,
            execution_time_ms: 0,
            timed_out: false,
            cases: None,
            load_error: Some(error.to_string()),
        })
    }

    fn on_run_start(&mut self, total: usize) -> io::Result<()> {
        self.cases = Vec::with_capacity(total);
        Ok(())
    }

    fn on_case_complete(&mut self, report: &CaseReport) -> io::Result<()> {
        if let CaseOutcome::Errored(fault) = &report.outcome {
            write_fault_diagnostics(&mut self.diag, &report.label, fault)?;
        }
        self.cases.push(CaseDocument::from(report));
        Ok(())
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let exercise = self.exercise.take();
        let cases = std::mem::take(&mut self.cases);
        self.write_document(&RunDocument {
            exercise: exercise.as_deref(),
            success: summary.success(),
            exit_code: summary.exit_code(),
            passed: summary.passed,
            failed: summary.failed,
            execution_time_ms: summary.duration.as_millis() as u64,
            timed_out: summary.timed_out(),
            cases: Some(cases.as_slice()),
            load_error: None,
        })
    }
}
