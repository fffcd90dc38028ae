//! Per-case results.
//!
//! A case goes through two stages:
//! - the exercise binds it to a target and matcher, producing a [`PreparedCase`] whose check returns
//!   `Result<Verdict, Fault>`;
//! - the verifier runs the check inside a fault boundary and records a [`CaseReport`] with the final
//!   [`CaseOutcome`].

use std::fmt;
use std::time::Duration;

/// What kind of abnormal termination a [`Fault`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The callable panicked.
    Panic,
    /// A fallible callable returned `Err`, or the verifier could not drive the case.
    Error,
    /// The callable did not return within the case timeout.
    TimedOut,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Panic => "panic",
            FaultKind::Error => "error",
            FaultKind::TimedOut => "timeout",
        }
    }
}

/// A runtime fault raised by the target while running one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub kind: FaultKind,
    /// Human-readable description (panic payload, error text, or timeout notice).
    pub message: String,
    /// Source location of the panic, when known.
    pub location: Option<String>,
    /// Captured backtrace, when trace capture is enabled.
    pub trace: Option<String>,
}

impl Fault {
    fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
            trace: None,
        }
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Panic, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Error, message)
    }

    pub fn timed_out(limit: Duration) -> Self {
        Self::new(FaultKind::TimedOut, format!("timed out after {} ms", limit.as_millis()))
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == FaultKind::TimedOut
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Fault {}

/// Result of comparing a normal return value against the expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    /// Values are rendered with `Debug` at comparison time.
    Mismatch { expected: String, actual: String },
}

/// Final classification of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Failed { expected: String, actual: String },
    Errored(Fault),
}

impl CaseOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }

    /// Mismatches and faults both count as failures.
    pub fn is_failed(&self) -> bool {
        !self.is_passed()
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, CaseOutcome::Errored(_))
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            CaseOutcome::Errored(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn status_str(&self) -> &'static str {
        match self {
            CaseOutcome::Passed => "passed",
            CaseOutcome::Failed { .. } => "failed",
            CaseOutcome::Errored(_) => "errored",
        }
    }
}

impl From<Result<Verdict, Fault>> for CaseOutcome {
    fn from(result: Result<Verdict, Fault>) -> Self {
        match result {
            Ok(Verdict::Passed) => CaseOutcome::Passed,
            Ok(Verdict::Mismatch { expected, actual }) => CaseOutcome::Failed { expected, actual },
            Err(fault) => CaseOutcome::Errored(fault),
        }
    }
}

/// Report of one executed case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// Zero-based position in the case table.
    pub index: usize,
    pub label: String,
    /// Hidden cases never reveal their values in reports.
    pub hidden: bool,
    pub outcome: CaseOutcome,
    pub duration: Duration,
}

/// Label and visibility of a prepared case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMeta {
    pub label: String,
    pub hidden: bool,
}

/// Deferred invocation of the target plus comparison for one case.
pub type CaseCheck = Box<dyn FnOnce() -> Result<Verdict, Fault> + Send + 'static>;

/// A case bound to its target and matcher, ready to be run exactly once.
pub struct PreparedCase {
    meta: CaseMeta,
    check: CaseCheck,
}

impl PreparedCase {
    pub fn new(label: impl Into<String>, hidden: bool, check: CaseCheck) -> Self {
        Self {
            meta: CaseMeta {
                label: label.into(),
                hidden,
            },
            check,
        }
    }

    pub fn meta(&self) -> &CaseMeta {
        &self.meta
    }

    pub fn into_parts(self) -> (CaseMeta, CaseCheck) {
        (self.meta, self.check)
    }
}

impl fmt::Debug for PreparedCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedCase")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}
