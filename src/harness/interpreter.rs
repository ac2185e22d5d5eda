//! Interpreter discovery and resolution.
//!
//! Lookups take the search path as an argument so callers (and tests) decide which `PATH` is
//! consulted; the `*_from_env` helpers read the process environment once at the edge.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use checkrun_core::conventions::{DEFAULT_INTERPRETER, INTERPRETER_CANDIDATES, INTERPRETER_ENV_VAR};

use super::errors::{HarnessError, HarnessResult};

/// An executable used to run test files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Name the interpreter was requested or probed under (e.g. `python3`).
    pub name: String,
    /// Absolute path to the executable.
    pub path: PathBuf,
}

impl Interpreter {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Resolve a user-supplied reference: either a path (contains a separator) or a bare name looked
    /// up on `search_path`.
    pub fn resolve(reference: &OsStr, search_path: Option<&OsStr>) -> HarnessResult<Self> {
        let name = reference.to_string_lossy().into_owned();
        let as_path = Path::new(reference);

        let found = if as_path.components().count() > 1 || as_path.is_absolute() {
            is_executable(as_path).then(|| absolutize(as_path))
        } else {
            find_on_path(&name, search_path)
        };

        found
            .map(|path| Self::new(name.clone(), path))
            .ok_or(HarnessError::InterpreterNotFound { name })
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Find an executable named `name` in the directories of `search_path`.
///
/// Returns the first match in search order.
pub fn find_on_path(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path?;
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .map(|candidate| absolutize(&candidate))
}

/// Probe every candidate name on `search_path`, in order.
///
/// Missing names are skipped silently. Two names resolving to the same file (e.g. a `python2`
/// symlink pointing at `python3`) yield a single entry, keeping the first.
pub fn probe(candidates: &[&str], search_path: Option<&OsStr>) -> Vec<Interpreter> {
    let mut found: Vec<Interpreter> = Vec::new();
    let mut seen: Vec<PathBuf> = Vec::new();

    for name in candidates {
        let Some(path) = find_on_path(name, search_path) else {
            tracing::debug!(interpreter = *name, "not found on PATH");
            continue;
        };
        let identity = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.contains(&identity) {
            tracing::debug!(interpreter = *name, path = %path.display(), "duplicate of an earlier interpreter");
            continue;
        }
        seen.push(identity);
        found.push(Interpreter::new(*name, path));
    }

    found
}

/// Probe the well-known interpreter names on the process `PATH`.
pub fn probe_from_env() -> Vec<Interpreter> {
    let search_path = env::var_os("PATH");
    probe(INTERPRETER_CANDIDATES, search_path.as_deref())
}

/// Pick the interpreter for a single phase run.
///
/// Order: `explicit`, then `env_value` (the `PYTHON` variable), then [`DEFAULT_INTERPRETER`] on
/// `search_path`.
pub fn select(
    explicit: Option<&OsStr>,
    env_value: Option<&OsStr>,
    search_path: Option<&OsStr>,
) -> HarnessResult<Interpreter> {
    if let Some(reference) = explicit {
        return Interpreter::resolve(reference, search_path);
    }
    if let Some(reference) = env_value.filter(|v| !v.is_empty()) {
        return Interpreter::resolve(reference, search_path);
    }
    Interpreter::resolve(OsStr::new(DEFAULT_INTERPRETER), search_path)
}

/// [`select`] against the process environment.
pub fn select_from_env(explicit: Option<&OsStr>) -> HarnessResult<Interpreter> {
    let env_value: Option<OsString> = env::var_os(INTERPRETER_ENV_VAR);
    let search_path = env::var_os("PATH");
    select(explicit, env_value.as_deref(), search_path.as_deref())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
