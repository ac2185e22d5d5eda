//! Well-known names the harness relies on.

/// Prefix every discoverable test file name starts with.
pub const TEST_FILE_PREFIX: &str = "test_";

/// Extension (without the dot) of discoverable test files.
pub const TEST_FILE_EXTENSION: &str = "py";

/// Environment variable naming the interpreter used to run test files.
pub const INTERPRETER_ENV_VAR: &str = "PYTHON";

/// Module search path variable extended with the helper directory for each test child.
pub const SEARCH_PATH_ENV_VAR: &str = "PYTHONPATH";

/// Executable name of an external phase runner inside its phase directory.
pub const RUNNER_SCRIPT_NAME: &str = "make_check";

/// Interpreter names probed on `PATH`, in probe order.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python2", "python3"];

/// Interpreter probed when a single phase is run without an explicit interpreter.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Directory (relative to the project root) holding one subdirectory per phase.
pub const TESTS_DIR: &str = "tests";

/// Column width the test file name is padded to on a status line.
pub const STATUS_COLUMN_WIDTH: usize = 50;

/// Check whether `file_name` follows the test file naming convention.
///
/// ## Parameters
/// - `file_name`: bare file name (no directory components).
///
/// ## Returns
/// - (`bool`): `true` for `test_<anything>.py`, where `<anything>` may be empty.
///
/// ## Examples
/// ```rust
/// use checkrun_core::conventions::is_test_file_name;
///
/// assert!(is_test_file_name("test_config.py"));
/// assert!(!is_test_file_name("helpers.py"));
/// assert!(!is_test_file_name("test_config.pyc"));
/// ```
pub fn is_test_file_name(file_name: &str) -> bool {
    let Some(stem) = file_name
        .strip_suffix(TEST_FILE_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
    else {
        return false;
    };
    stem.starts_with(TEST_FILE_PREFIX)
}
