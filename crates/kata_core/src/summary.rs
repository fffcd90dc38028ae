//! Aggregated counters of a verification run.

use std::time::Duration;

use crate::outcome::CaseReport;

/// Pass/fail counters plus the per-case reports they were derived from.
///
/// The exit status is a pure function of `failed`: `0` when nothing failed, `1` otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    /// Mismatches and faults.
    pub failed: usize,
    pub cases: Vec<CaseReport>,
    /// Wall time of the whole run.
    pub duration: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        RunSummary::default()
    }

    pub fn record(&mut self, report: CaseReport) {
        if report.outcome.is_passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.cases.push(report);
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }

    /// Whether any case was cut off by the case timeout.
    pub fn timed_out(&self) -> bool {
        self.cases
            .iter()
            .any(|case| case.outcome.fault().is_some_and(|fault| fault.is_timeout()))
    }

    /// Counters only, for comparing runs regardless of timing.
    pub fn counts(&self) -> (usize, usize) {
        (self.passed, self.failed)
    }
}
