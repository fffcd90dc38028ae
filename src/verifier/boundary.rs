//! Fault boundary around a single case.
//!
//! A case check runs under `catch_unwind`. A process-wide panic hook, installed once, records the panic location
//! and (optionally) a backtrace into a thread-local slot while the current thread is inside a boundary; outside a
//! boundary it defers to the previously installed hook. An error fault returned by the target gets a backtrace of
//! the boundary when traces are on, since it has no panic site of its own.
//!
//! With a time limit the check runs on its own worker thread and the caller waits on a channel. A worker that
//! misses the deadline is detached: threads cannot be killed, so a target that never returns keeps its thread
//! until the process exits.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use kata_core::{CaseCheck, Fault, FaultKind, Verdict};
use tracing::warn;

static PANIC_HOOK_INSTALLED: Once = Once::new();

struct CapturedPanic {
    location: Option<String>,
    trace: Option<String>,
}

thread_local! {
    /// `Some(capture_trace)` while this thread is inside a boundary.
    static BOUNDARY: Cell<Option<bool>> = const { Cell::new(None) };
    static CAPTURED: RefCell<Option<CapturedPanic>> = const { RefCell::new(None) };
}

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let Some(capture_trace) = BOUNDARY.get() else {
                default_hook(panic_info);
                return;
            };
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
            let trace = capture_trace.then(|| Backtrace::force_capture().to_string());
            CAPTURED.with(|slot| *slot.borrow_mut() = Some(CapturedPanic { location, trace }));
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}

/// Run `check` on the current thread, converting a panic into a [`Fault`].
pub(crate) fn guard(check: CaseCheck, capture_trace: bool) -> Result<Verdict, Fault> {
    install_panic_hook();
    let previous = BOUNDARY.replace(Some(capture_trace));
    let result = panic::catch_unwind(AssertUnwindSafe(check));
    BOUNDARY.set(previous);

    let captured = CAPTURED.with(|slot| slot.borrow_mut().take());
    match result {
        Ok(Err(fault)) if capture_trace && fault.kind == FaultKind::Error && fault.trace.is_none() => {
            Err(fault.with_trace(Backtrace::force_capture().to_string()))
        }
        Ok(result) => result,
        Err(payload) => {
            let mut fault = Fault::panic(panic_message(payload.as_ref()));
            if let Some(CapturedPanic { location, trace }) = captured {
                if let Some(location) = location {
                    fault = fault.with_location(location);
                }
                if let Some(trace) = trace {
                    fault = fault.with_trace(trace);
                }
            }
            Err(fault)
        }
    }
}

/// Run `check` inside a boundary, bounded by `timeout` when one is set.
pub(crate) fn run_case(
    index: usize,
    check: CaseCheck,
    timeout: Option<Duration>,
    capture_trace: bool,
) -> Result<Verdict, Fault> {
    let Some(limit) = timeout else {
        return guard(check, capture_trace);
    };

    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(format!("kata-case-{index}"))
        .spawn(move || {
            // The receiver is gone once the case has timed out.
            let _ = tx.send(guard(check, capture_trace));
        });
    if let Err(e) = spawned {
        return Err(Fault::error(format!("failed to start case worker: {e}")));
    }

    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!(case = index, limit_ms = limit.as_millis() as u64, "case timed out; worker detached");
            Err(Fault::timed_out(limit))
        }
        Err(RecvTimeoutError::Disconnected) => Err(Fault::error("case worker exited without a result")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(f: impl FnOnce() -> Result<Verdict, Fault> + Send + 'static) -> CaseCheck {
        Box::new(f)
    }

    #[test]
    fn test_guard_passes_through_verdict() {
        assert_eq!(guard(check(|| Ok(Verdict::Passed)), false), Ok(Verdict::Passed));
    }

    #[test]
    fn test_guard_passes_through_error_fault() {
        let result = guard(check(|| Err(Fault::error("bad input"))), false);
        assert_eq!(result, Err(Fault::error("bad input")));
    }

    #[test]
    fn test_guard_traces_error_fault() {
        let fault = guard(check(|| Err(Fault::error("bad input"))), true).unwrap_err();
        assert_eq!(fault.kind, FaultKind::Error);
        assert_eq!(fault.message, "bad input");
        assert!(fault.location.is_none());
        assert!(fault.trace.is_some());
    }

    #[test]
    fn test_guard_keeps_existing_error_trace() {
        let fault = Fault::error("bad input").with_trace("   0: solution::parse\n");
        let result = guard(check(move || Err(fault)), true).unwrap_err();
        assert_eq!(result.trace.as_deref(), Some("   0: solution::parse\n"));
    }

    #[test]
    fn test_guard_catches_str_panic() {
        let fault = guard(check(|| panic!("boom")), false).unwrap_err();
        assert_eq!(fault.kind, FaultKind::Panic);
        assert_eq!(fault.message, "boom");
        assert!(fault.location.as_deref().is_some_and(|loc| loc.contains("boundary.rs")));
        assert!(fault.trace.is_none());
    }

    #[test]
    fn test_guard_catches_formatted_panic_with_trace() {
        let fault = guard(check(|| panic!("index {} out of range", 7)), true).unwrap_err();
        assert_eq!(fault.message, "index 7 out of range");
        assert!(fault.trace.is_some());
    }

    #[test]
    fn test_guard_catches_arithmetic_panic() {
        let fault = guard(
            check(|| {
                let divisor = std::hint::black_box(0_i64);
                let _ = 10 / divisor;
                Ok(Verdict::Passed)
            }),
            false,
        )
        .unwrap_err();
        assert!(fault.message.contains("divide by zero"));
    }

    #[test]
    fn test_boundary_flag_reset_after_guard() {
        let _ = guard(check(|| panic!("boom")), false);
        assert_eq!(BOUNDARY.get(), None);
    }

    #[test]
    fn test_run_case_inline_without_timeout() {
        let result = run_case(0, check(|| Ok(Verdict::Passed)), None, false);
        assert_eq!(result, Ok(Verdict::Passed));
    }

    #[test]
    fn test_run_case_on_worker_with_timeout() {
        let result = run_case(0, check(|| panic!("worker boom")), Some(Duration::from_secs(5)), false);
        assert_eq!(result.unwrap_err().message, "worker boom");
    }

    #[test]
    fn test_run_case_times_out() {
        let result = run_case(
            3,
            check(|| {
                thread::sleep(Duration::from_secs(5));
                Ok(Verdict::Passed)
            }),
            Some(Duration::from_millis(100)),
            false,
        );
        let fault = result.unwrap_err();
        assert_eq!(fault.kind, FaultKind::TimedOut);
        assert_eq!(fault.message, "timed out after 100 ms");
    }
}
