//! Provide the pure vocabulary shared by the checkrun phase and suite runners.
//!
//! This crate is intentionally small and dependency-free. It holds the deterministic parts of the
//! harness that both runners (and their tests) must agree on:
//! - the phase registry and its canonical order ([`phases`]),
//! - file naming and environment conventions ([`conventions`]),
//! - pass/fail classification, status-line rendering and exit-code aggregation ([`status`]).
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no process spawning, no global state.

pub mod conventions;
pub mod phases;
pub mod status;

pub use phases::PhaseId;
pub use status::Status;
