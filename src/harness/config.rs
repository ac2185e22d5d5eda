//! Harness configuration
//!
//! Typed settings for a single phase run and for a whole suite. Values come from CLI flags and the
//! environment; there is no configuration file. Everything a runner needs is carried here so no
//! runner reads or mutates process-global state (working directory, `PYTHON`).

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use checkrun_core::PhaseId;
use checkrun_core::conventions::{RUNNER_SCRIPT_NAME, STATUS_COLUMN_WIDTH, TESTS_DIR};
use checkrun_core::phases;

use super::errors::{HarnessError, HarnessResult};
use super::interpreter::Interpreter;

/// Settings for one in-process phase run.
#[derive(Debug, Clone)]
pub struct PhaseConfig {
    /// Phase being run (used for the header line)
    pub phase: PhaseId,
    /// Directory holding the test files
    pub directory: PathBuf,
    /// Interpreter every test file is run with
    pub interpreter: Interpreter,
    /// Directory prepended to the children's module search path (defaults to `directory/../..`)
    pub helper_dir: Option<PathBuf>,
    /// Width the file name column is padded to
    pub column_width: usize,
    /// Only run files whose name contains this keyword
    pub filter: Option<String>,
    /// Append elapsed time to status lines
    pub verbose: bool,
}

impl PhaseConfig {
    pub fn new(phase: PhaseId, directory: impl Into<PathBuf>, interpreter: Interpreter) -> Self {
        Self {
            phase,
            directory: directory.into(),
            interpreter,
            helper_dir: None,
            column_width: STATUS_COLUMN_WIDTH,
            filter: None,
            verbose: false,
        }
    }

    /// Override the helper directory
    pub fn with_helper_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.helper_dir = Some(dir.into());
        self
    }

    /// Set the status column width
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Restrict the run to files whose name contains `keyword`
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        self.filter = Some(keyword.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Make the phase directory absolute and check it is a directory.
    ///
    /// The result no longer depends on the caller's current directory.
    pub fn resolve(mut self) -> HarnessResult<Self> {
        self.directory = resolve_directory(&self.directory)?;
        Ok(self)
    }

    /// Helper directory actually used for children.
    pub fn effective_helper_dir(&self) -> PathBuf {
        match &self.helper_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.directory.join(dir),
            None => self.directory.join("..").join(".."),
        }
    }
}

/// Settings for a full suite run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Project root; phase directories live under `root/tests/`
    pub root: PathBuf,
    /// Phases to run (empty means all). Always executed in canonical order.
    pub phases: Vec<PhaseId>,
    /// Explicit interpreters; replaces probing when non-empty
    pub interpreters: Vec<OsString>,
    /// File name of external phase runners
    pub runner_name: String,
    pub verbose: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            phases: Vec::new(),
            interpreters: Vec::new(),
            runner_name: RUNNER_SCRIPT_NAME.to_string(),
            verbose: false,
        }
    }
}

impl SuiteConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_phases(mut self, phases: Vec<PhaseId>) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_interpreters(mut self, interpreters: Vec<OsString>) -> Self {
        self.interpreters = interpreters;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Make the root absolute so no later step depends on the current directory.
    pub fn resolve(mut self) -> HarnessResult<Self> {
        self.root = resolve_directory(&self.root)?;
        Ok(self)
    }

    /// Phases to run, in execution order.
    pub fn selected_phases(&self) -> Vec<PhaseId> {
        if self.phases.is_empty() {
            phases::all()
        } else {
            phases::canonical_order(&self.phases)
        }
    }

    /// Directory of `phase` under the project root.
    pub fn phase_directory(&self, phase: PhaseId) -> PathBuf {
        self.root.join(TESTS_DIR).join(phases::directory(phase))
    }

    /// External runner executable for `phase`.
    pub fn runner_path(&self, phase: PhaseId) -> PathBuf {
        self.phase_directory(phase).join(&self.runner_name)
    }
}

/// Canonicalize `path` and check that it is a directory.
pub fn resolve_directory(path: &Path) -> HarnessResult<PathBuf> {
    let resolved = path.canonicalize().map_err(|source| HarnessError::Directory {
        path: path.to_path_buf(),
        source,
    })?;
    if !resolved.is_dir() {
        return Err(HarnessError::Directory {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn interpreter() -> Interpreter {
        Interpreter::new("python3", "/usr/bin/python3")
    }

    #[test]
    fn test_default_phase_config() {
        let config = PhaseConfig::new(PhaseId::Unit, "/srv/project/tests/unit", interpreter());
        assert_eq!(config.column_width, STATUS_COLUMN_WIDTH);
        assert!(config.filter.is_none());
        assert!(!config.verbose);
        assert_eq!(
            config.effective_helper_dir(),
            PathBuf::from("/srv/project/tests/unit/../..")
        );
    }

    #[test]
    fn test_relative_helper_dir_is_joined_to_phase_dir() {
        let config = PhaseConfig::new(PhaseId::Unit, "/srv/project/tests/unit", interpreter()).with_helper_dir("../helpers");
        assert_eq!(
            config.effective_helper_dir(),
            PathBuf::from("/srv/project/tests/unit/../helpers")
        );
    }

    #[test]
    fn test_resolve_rejects_missing_directory() {
        let err = PhaseConfig::new(PhaseId::Unit, "/no/such/checkrun/dir", interpreter())
            .resolve()
            .unwrap_err();
        assert!(matches!(err, HarnessError::Directory { .. }));
    }

    #[test]
    fn test_resolve_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = PhaseConfig::new(PhaseId::Unit, file.path(), interpreter())
            .resolve()
            .unwrap_err();
        assert!(matches!(err, HarnessError::Directory { .. }));
    }

    #[test]
    fn test_resolve_makes_directory_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let config = PhaseConfig::new(PhaseId::Unit, dir.path(), interpreter()).resolve().unwrap();
        assert!(config.directory.is_absolute());
    }

    #[test]
    fn test_suite_phase_layout() {
        let config = SuiteConfig::new("/srv/project");
        assert_eq!(config.phase_directory(PhaseId::Unit), PathBuf::from("/srv/project/tests/unit"));
        assert_eq!(
            config.runner_path(PhaseId::Install),
            PathBuf::from("/srv/project/tests/install_test/make_check")
        );
    }

    #[test]
    fn test_missing_root_error_is_not_phase_specific() {
        let err = SuiteConfig::new("/no/such/checkrun/root").resolve().unwrap_err();
        assert!(matches!(&err, HarnessError::Directory { path, .. } if path == Path::new("/no/such/checkrun/root")));
        let message = err.to_string();
        assert!(message.starts_with("directory '/no/such/checkrun/root' is not usable"), "{message}");
        assert!(!message.contains("phase"));
    }

    #[test]
    fn test_suite_selected_phases() {
        let config = SuiteConfig::default();
        assert_eq!(config.selected_phases(), phases::all());

        let config = config.with_phases(vec![PhaseId::Install, PhaseId::Unit]);
        assert_eq!(config.selected_phases(), vec![PhaseId::Unit, PhaseId::Install]);
    }
}
