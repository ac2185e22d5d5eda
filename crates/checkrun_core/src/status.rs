//! Pass/fail classification and the fixed-width status table format.
//!
//! ## Notes
//! - There are exactly two outcomes. A test file that fails an assertion, crashes, or is killed by a
//!   signal is a [`Status::Fail`] like any other non-zero exit.
//! - Rendering helpers return owned lines without a trailing newline; writers add line endings.

use std::fmt;

/// Exit code reported when every supervised unit passed.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code reported when at least one supervised unit failed.
pub const EXIT_FAILURE: i32 = 1;

/// Literal separating the padded name from the status label.
pub const SEPARATOR: &str = "...";

/// Outcome of one test file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    /// Classify a process exit code.
    ///
    /// ## Parameters
    /// - `code`: exit code, or `None` when the process was terminated by a signal.
    ///
    /// ## Returns
    /// - [`Status::Pass`] only for `Some(0)`.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Status::Pass,
            _ => Status::Fail,
        }
    }

    /// Bracketed label printed at the end of a status line.
    pub fn label(self) -> &'static str {
        match self {
            Status::Pass => "[ pass ]",
            Status::Fail => "[ FAIL ]",
        }
    }

    pub fn is_pass(self) -> bool {
        self == Status::Pass
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Render one status line.
///
/// ## Parameters
/// - `name`: test file display name.
/// - `status`: outcome of the file.
/// - `width`: column width the name is left-justified into.
///
/// ## Returns
/// - (`String`): `"<name padded to width> ... [ pass ]"` (or `[ FAIL ]`).
///
/// ## Notes
/// - Names longer than `width` are printed in full; the separator then follows directly.
///
/// ## Examples
/// ```rust
/// use checkrun_core::status::{status_line, Status};
///
/// assert_eq!(status_line("test_a.py", Status::Pass, 12), "test_a.py    ... [ pass ]");
/// ```
pub fn status_line(name: &str, status: Status, width: usize) -> String {
    format!("{name:<width$} {SEPARATOR} {}", status.label())
}

/// Render the header line printed once before a phase's status lines.
pub fn header_line(title: &str) -> String {
    format!("{title}:")
}

/// Aggregate individual outcomes into a single exit code.
///
/// ## Returns
/// - [`EXIT_FAILURE`] if any status is [`Status::Fail`], otherwise [`EXIT_SUCCESS`] (including for
///   an empty input).
pub fn aggregate<I>(statuses: I) -> i32
where
    I: IntoIterator<Item = Status>,
{
    statuses
        .into_iter()
        .fold(EXIT_SUCCESS, |acc, status| if status.is_pass() { acc } else { EXIT_FAILURE })
}
