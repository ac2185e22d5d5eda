//! Define the phase registry: the fixed set of test phases and the order they run in.
//!
//! Every phase has a stable identifier ([`PhaseId`]) and one entry in the const table [`PHASES`].
//! The table order *is* the execution order; the suite runner never reorders it.
//!
//! ## Examples
//! ```rust
//! use checkrun_core::phases::{self, PhaseId};
//!
//! assert_eq!(phases::from_str("install"), Some(PhaseId::Install));
//! assert_eq!(phases::directory(PhaseId::Install), "install_test");
//! assert_eq!(phases::canonical_order(&[PhaseId::Install, PhaseId::Unit]), vec![PhaseId::Unit, PhaseId::Install]);
//! ```

use std::fmt;

/// Stable identifier for every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhaseId {
    Unit,
    Integration,
    Install,
}

/// How a phase is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    /// Test files are discovered and run by the in-process phase runner.
    InProcess,
    /// An opaque runner executable in the phase directory decides pass/fail by its exit code.
    ExternalRunner,
}

/// Registry metadata for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseInfo {
    pub id: PhaseId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    /// Directory name under the project's tests directory.
    pub directory: &'static str,
    pub kind: PhaseKind,
    /// Human-facing title used in headers.
    pub title: &'static str,
}

/// All phases, in execution order.
pub const PHASES: &[PhaseInfo] = &[
    PhaseInfo {
        id: PhaseId::Unit,
        canonical: "unit",
        aliases: &[],
        directory: "unit",
        kind: PhaseKind::InProcess,
        title: "Unit tests",
    },
    PhaseInfo {
        id: PhaseId::Integration,
        canonical: "integration",
        aliases: &["it"],
        directory: "integration",
        kind: PhaseKind::ExternalRunner,
        title: "Integration tests",
    },
    PhaseInfo {
        id: PhaseId::Install,
        canonical: "install",
        aliases: &["install_test"],
        directory: "install_test",
        kind: PhaseKind::ExternalRunner,
        title: "Install tests",
    },
];

/// Full metadata.
///
/// ## Parameters
/// - `id`: Phase identifier.
///
/// ## Returns
/// - The associated [`PhaseInfo`] from [`PHASES`].
pub fn info_for(id: PhaseId) -> &'static PhaseInfo {
    // PHASES is declared in enum order; `registry_matches_enum_order` guards that.
    &PHASES[id as usize]
}

/// Canonical spelling.
pub fn as_str(id: PhaseId) -> &'static str {
    info_for(id).canonical
}

/// Directory name under the tests directory.
pub fn directory(id: PhaseId) -> &'static str {
    info_for(id).directory
}

/// Execution kind.
pub fn kind(id: PhaseId) -> PhaseKind {
    info_for(id).kind
}

/// Header title.
pub fn title(id: PhaseId) -> &'static str {
    info_for(id).title
}

/// Lookup by spelling (canonical or alias).
///
/// ## Parameters
/// - `s`: Candidate phase spelling.
///
/// ## Returns
/// - `Some(PhaseId)` if the spelling matches this registry.
/// - `None` otherwise.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<PhaseId> {
    PHASES
        .iter()
        .find(|p| p.canonical == s || p.aliases.contains(&s))
        .map(|p| p.id)
}

/// Every phase, in execution order.
pub fn all() -> Vec<PhaseId> {
    PHASES.iter().map(|p| p.id).collect()
}

/// Normalize a caller-selected subset of phases into execution order.
///
/// ## Parameters
/// - `selected`: phases in any order, possibly with duplicates.
///
/// ## Returns
/// - (`Vec<PhaseId>`): the selected phases, deduplicated, in [`PHASES`] order.
///
/// ## Notes
/// - An empty selection yields an empty list; callers decide whether that means "all".
pub fn canonical_order(selected: &[PhaseId]) -> Vec<PhaseId> {
    PHASES
        .iter()
        .map(|p| p.id)
        .filter(|id| selected.contains(id))
        .collect()
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}
