//! Verifier configuration.

use std::time::Duration;

/// Default per-case time limit.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Smallest accepted per-case time limit.
pub const MIN_TIMEOUT: Duration = Duration::from_millis(1_000);
/// Largest accepted per-case time limit.
pub const MAX_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Settings for a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Per-case time limit; `None` runs each case inline with no limit.
    pub timeout: Option<Duration>,
    /// Capture a backtrace for panicking and erroring cases.
    pub capture_traces: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            capture_traces: true,
        }
    }
}

impl VerifierConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-case time limit, clamped to [`MIN_TIMEOUT`]..=[`MAX_TIMEOUT`]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(clamp_timeout(timeout));
        self
    }

    /// Run cases without a time limit
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Enable or disable backtrace capture
    pub fn with_traces(mut self, capture: bool) -> Self {
        self.capture_traces = capture;
        self
    }
}

pub fn clamp_timeout(timeout: Duration) -> Duration {
    timeout.clamp(MIN_TIMEOUT, MAX_TIMEOUT)
}
