#![forbid(unsafe_code)]
//! checkrun: a test harness for `test_*.py` suites
//!
//! checkrun discovers test files in a phase directory, runs each one as a child process with a
//! chosen interpreter, prints a one-line pass/fail status per file (dumping captured output for
//! failures), and aggregates a single exit code. The suite runner repeats the unit, integration and
//! install phases for every interpreter found, stopping at the first failing phase.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Test failures are not errors**: a failing test file is a recorded `Status::Fail`. `HarnessError` is reserved for
//!   conditions that stop the harness itself (no interpreter, unusable directory, runner that cannot start).

pub mod cli;
pub mod harness;
pub mod version;

pub use checkrun_core::{PhaseId, Status};
pub use harness::{HarnessError, Interpreter, PhaseConfig, SuiteConfig};
