//! Test harness: discovery, execution and aggregation of `test_*.py` files.
//!
//! ## Modules
//!
//! - `config` - Phase and suite settings
//! - `interpreter` - Interpreter probing on `PATH` and resolution
//! - `discovery` - Test file listing (`TestDiscovery` trait)
//! - `executor` - Child process execution with combined output capture (`TestExecutor` trait)
//! - `reporter` - Status table rendering (`PhaseReporter` trait)
//! - `phase_runner` - One directory of test files, one aggregate exit code
//! - `suite_runner` - All phases for all interpreters, short-circuiting on failure
//!
//! ## Design
//!
//! Discovery, execution and reporting sit behind traits so the run loops can be exercised without
//! spawning processes. Default implementations are what the CLI uses.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod discovery;
pub mod errors;
pub mod executor;
pub mod interpreter;
pub mod phase_runner;
pub mod reporter;
pub mod suite_runner;

pub use config::{PhaseConfig, SuiteConfig};
pub use errors::{HarnessError, HarnessResult};
pub use interpreter::Interpreter;
pub use phase_runner::{PhaseReport, run_phase, run_phase_to_stdout};
pub use suite_runner::{PhaseInvoker, ProjectPhaseInvoker, SuiteRunner};
