//! The verifier: load a target, run its cases in order, aggregate and report.
//!
//! ## Run lifecycle
//!
//! `NotStarted → Loading → LoadFailed` (terminal: reported once, no cases run, no summary), or
//! `Loading → Loaded → case 1..N → AllCasesComplete`. Nothing is retried.
//!
//! Every case is evaluated exactly once, in table order, inside a fault boundary (see [`boundary`]). A mismatch
//! or fault is recorded against that case only; the next case always runs.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod boundary;
pub mod config;

use std::io;
use std::time::Instant;

use kata_core::{CaseOutcome, CaseReport, LoadError, PreparedCase, RunSummary, SolutionRegistry};
use kata_exercises::Catalog;
use thiserror::Error;
use tracing::{debug, info};

use crate::report::CaseReporter;

pub use config::VerifierConfig;

/// Errors that end a verification run early.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The target could not be obtained; already reported.
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Runs prepared cases sequentially under a [`VerifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Load `exercise` from `catalog`, resolve its solution and run every case.
    ///
    /// A load failure is reported through `reporter` and returned as [`VerifyError::Load`]; no case runs.
    pub fn verify(
        &self,
        catalog: &Catalog,
        solutions: &SolutionRegistry,
        exercise: &str,
        reporter: &mut dyn CaseReporter,
    ) -> Result<RunSummary, VerifyError> {
        reporter.on_load_start(exercise)?;
        let loaded = match catalog.load(exercise, solutions) {
            Ok(loaded) => loaded,
            Err(e) => {
                info!(exercise, error = %e, "load failed");
                reporter.on_load_failure(&e)?;
                return Err(VerifyError::Load(e));
            }
        };
        info!(
            exercise,
            entry_point = loaded.info.entry_point,
            cases = loaded.cases.len(),
            "verifying"
        );
        self.run(loaded.cases, reporter)
    }

    /// Run already-bound cases in order and return the aggregated summary.
    pub fn run(&self, cases: Vec<PreparedCase>, reporter: &mut dyn CaseReporter) -> Result<RunSummary, VerifyError> {
        let start = Instant::now();
        let mut summary = RunSummary::new();
        reporter.on_run_start(cases.len())?;

        for (index, case) in cases.into_iter().enumerate() {
            let (meta, check) = case.into_parts();
            debug!(case = index, label = %meta.label, "running case");

            let case_start = Instant::now();
            let result = boundary::run_case(index, check, self.config.timeout, self.config.capture_traces);
            let report = CaseReport {
                index,
                label: meta.label,
                hidden: meta.hidden,
                outcome: CaseOutcome::from(result),
                duration: case_start.elapsed(),
            };
            debug!(case = index, status = report.outcome.status_str(), "case complete");

            reporter.on_case_complete(&report)?;
            summary.record(report);
        }

        summary.duration = start.elapsed();
        info!(
            passed = summary.passed,
            failed = summary.failed,
            elapsed_ms = summary.duration.as_millis() as u64,
            "run complete"
        );
        reporter.on_run_complete(&summary)?;
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use kata_core::{FaultKind, Matcher, Target, TestCase, bind_all};
    use kata_exercises::reference;

    use super::*;

    /// Records the callback sequence for assertions.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl CaseReporter for Recorder {
        fn on_load_start(&mut self, exercise: &str) -> io::Result<()> {
            self.events.push(format!("load {exercise}"));
            Ok(())
        }

        fn on_load_failure(&mut self, error: &LoadError) -> io::Result<()> {
            self.events.push(format!("load-failed {error}"));
            Ok(())
        }

        fn on_run_start(&mut self, total: usize) -> io::Result<()> {
            self.events.push(format!("start {total}"));
            Ok(())
        }

        fn on_case_complete(&mut self, report: &CaseReport) -> io::Result<()> {
            self.events.push(format!("{} {}", report.outcome.status_str(), report.label));
            Ok(())
        }

        fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
            self.events.push(format!("done {} {}", summary.passed, summary.failed));
            Ok(())
        }
    }

    fn add_cases() -> Vec<TestCase<(i64, i64), i64>> {
        kata_exercises::mathematics::add_two_numbers_cases()
    }

    fn quick() -> Verifier {
        Verifier::new(VerifierConfig::new().without_timeout().with_traces(false))
    }

    #[test]
    fn test_verify_builtin_exercise_passes() {
        let mut recorder = Recorder::default();
        let summary = quick()
            .verify(&Catalog::builtin(), &reference::solutions(), "add_two_numbers", &mut recorder)
            .unwrap();
        assert_eq!(summary.counts(), (4, 0));
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(
            recorder.events,
            vec![
                "load add_two_numbers",
                "start 4",
                "passed Positive numbers",
                "passed Neg + Pos",
                "passed Zeros",
                "passed Both negative",
                "done 4 0",
            ]
        );
    }

    #[test]
    fn test_verify_unknown_exercise_reports_load_failure_only() {
        let mut recorder = Recorder::default();
        let err = quick()
            .verify(&Catalog::builtin(), &reference::solutions(), "fizz_buzz", &mut recorder)
            .unwrap_err();
        assert!(matches!(err, VerifyError::Load(LoadError::UnknownExercise(_))));
        assert_eq!(
            recorder.events,
            vec!["load fizz_buzz", "load-failed no exercise named 'fizz_buzz'"]
        );
    }

    #[test]
    fn test_verify_missing_solution_runs_no_cases() {
        let mut recorder = Recorder::default();
        let result = quick().verify(
            &Catalog::builtin(),
            &SolutionRegistry::new(),
            "add_two_numbers",
            &mut recorder,
        );
        assert!(matches!(
            result,
            Err(VerifyError::Load(LoadError::MissingEntryPoint { .. }))
        ));
        assert!(recorder.events.iter().all(|e| !e.starts_with("start")));
    }

    #[test]
    fn test_wrong_value_counts_one_failure() {
        let target = Target::new(|(a, b): (i64, i64)| if (a, b) == (5, 3) { 7 } else { a + b });
        let cases = bind_all(add_cases(), &target, &Matcher::exact());
        let summary = quick().run(cases, &mut Recorder::default()).unwrap();
        assert_eq!(summary.counts(), (3, 1));
        assert_eq!(
            summary.cases[0].outcome,
            CaseOutcome::Failed {
                expected: "8".to_string(),
                actual: "7".to_string()
            }
        );
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_fault_is_isolated_and_later_cases_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let target = Target::new(move |(a, b): (i64, i64)| {
            counter.fetch_add(1, Ordering::SeqCst);
            if a == -5 {
                let zero = std::hint::black_box(0);
                return a / zero;
            }
            a + b
        });
        let cases = bind_all(add_cases(), &target, &Matcher::exact());
        let summary = quick().run(cases, &mut Recorder::default()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(summary.counts(), (3, 1));
        let fault = summary.cases[1].outcome.fault().unwrap();
        assert_eq!(fault.kind, FaultKind::Panic);
        assert!(fault.message.contains("divide by zero"));
        assert!(summary.cases[2].outcome.is_passed());
    }

    #[test]
    fn test_each_case_invoked_once_with_timeout_workers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let target = Target::new(move |(a, b): (i64, i64)| {
            counter.fetch_add(1, Ordering::SeqCst);
            a + b
        });
        let cases = bind_all(add_cases(), &target, &Matcher::exact());
        let verifier = Verifier::new(VerifierConfig::new().with_timeout(Duration::from_secs(5)));
        let summary = verifier.run(cases, &mut Recorder::default()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_hung_case_times_out_and_run_continues() {
        let target = Target::new(|(a, b): (i64, i64)| {
            if a == 0 {
                std::thread::sleep(Duration::from_secs(30));
            }
            a + b
        });
        let cases = bind_all(add_cases(), &target, &Matcher::exact());
        let verifier = Verifier::new(VerifierConfig::new().with_timeout(Duration::from_millis(1_000)));
        let summary = verifier.run(cases, &mut Recorder::default()).unwrap();

        assert_eq!(summary.counts(), (3, 1));
        assert!(summary.timed_out());
        assert!(summary.cases[3].outcome.is_passed());
    }

    #[test]
    fn test_run_is_idempotent() {
        let verifier = quick();
        let target = Target::new(|(a, b): (i64, i64)| a * b);
        let first = verifier
            .run(bind_all(add_cases(), &target, &Matcher::exact()), &mut Recorder::default())
            .unwrap();
        let second = verifier
            .run(bind_all(add_cases(), &target, &Matcher::exact()), &mut Recorder::default())
            .unwrap();
        assert_eq!(first.counts(), second.counts());
        assert_eq!(first.exit_code(), second.exit_code());
    }

    #[test]
    fn test_empty_case_list_is_success() {
        let summary = quick().run(Vec::new(), &mut Recorder::default()).unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.exit_code(), 0);
    }
}
