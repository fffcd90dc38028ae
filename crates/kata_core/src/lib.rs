//! Provide the pure case, target and outcome model shared by the kata verifier and its exercise catalog.
//!
//! This crate is intentionally small and dependency-light. It describes *what* a verification run is made of:
//! - [`TestCase`]: one labeled `(input, expected)` pair, immutable once authored,
//! - [`Target`]: the callable under test, registered under a fixed entry-point name in a [`SolutionRegistry`],
//! - [`Matcher`]: the per-exercise equality policy (exact or tolerance-based),
//! - [`CaseOutcome`] / [`RunSummary`]: the derived per-case results and the aggregated counters.
//!
//! ## Notes
//!
//! - This is a "model" crate: **no IO**, no global state, no threads. Running cases inside a fault boundary and
//!   printing reports lives in the `kata` crate.
//! - Name-based lookup of the target is replaced by explicit registration: a solution is registered with its
//!   signature and resolution fails with a [`LoadError`] if the name or signature does not match.

pub mod case;
pub mod compare;
pub mod errors;
pub mod outcome;
pub mod summary;
pub mod target;

pub use case::{TestCase, bind_all};
pub use compare::{Approx, Matcher, Policy, Tolerance};
pub use errors::LoadError;
pub use outcome::{CaseCheck, CaseMeta, CaseOutcome, CaseReport, Fault, FaultKind, PreparedCase, Verdict};
pub use summary::RunSummary;
pub use target::{SolutionRegistry, Target, signature};
