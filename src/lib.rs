#![forbid(unsafe_code)]
//! Kata solution verifier
//!
//! Checks one solution function per exercise against the exercise's fixed table of literal input/output cases
//! and reports pass/fail counts. The data model lives in `kata_core`, the exercise catalog in `kata_exercises`;
//! this crate provides the verifier engine, the reporters and the `kata` CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `verifier`
//!   modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Solutions under test**: A panicking solution is never a verifier bug. The verifier catches the panic at
//!   the case boundary and records it as a failed case.

pub mod cli;
pub mod report;
pub mod verifier;
pub mod version;

pub use report::{CaseReporter, ConsoleReporter, JsonReporter, MarkerStyle, ReportFormat};
pub use verifier::{Verifier, VerifierConfig, VerifyError};
