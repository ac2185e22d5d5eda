//! Running a single test file as a child process.
//!
//! stdout and stderr share the write end of a single pipe, like `2>&1` in a shell, so the captured
//! output keeps the order in which the child wrote it.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::iter;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use checkrun_core::Status;
use checkrun_core::conventions::SEARCH_PATH_ENV_VAR;

use super::config::PhaseConfig;
use super::discovery::TestFile;

/// Result of one test file run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Exit code; `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
    /// Combined stdout and stderr
    pub output: Vec<u8>,
    pub duration: Duration,
}

impl Execution {
    pub fn status(&self) -> Status {
        Status::from_exit_code(self.exit_code)
    }
}

/// Execute a test file.
///
/// An `Err` means the child could not be run at all; the phase runner still reports that file as a
/// failure and keeps going.
pub trait TestExecutor {
    fn execute(&self, file: &TestFile, config: &PhaseConfig) -> io::Result<Execution>;
}

/// Runs `<interpreter> <file>` in the phase directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl TestExecutor for ProcessExecutor {
    fn execute(&self, file: &TestFile, config: &PhaseConfig) -> io::Result<Execution> {
        let start = Instant::now();
        let inherited = env::var_os(SEARCH_PATH_ENV_VAR);
        let search_path = prepend_search_path(&config.effective_helper_dir(), inherited.as_deref())?;

        tracing::debug!(
            file = %file.name,
            interpreter = %config.interpreter.path.display(),
            "running test file"
        );

        let (reader, writer) = io::pipe()?;
        // `command` owns our copies of the write end; dropping it at the end of the block lets the
        // read below see EOF once the child exits
        let mut child = {
            let mut command = Command::new(&config.interpreter.path);
            command
                .arg(&file.path)
                .current_dir(&config.directory)
                .env(SEARCH_PATH_ENV_VAR, search_path)
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            command.spawn()?
        };

        let output = collect_output(&mut child, reader)?;
        let status = child.wait()?;

        Ok(Execution {
            exit_code: status.code(),
            output,
            duration: start.elapsed(),
        })
    }
}

/// Build the children's search path: `helper` first, then the inherited entries.
pub fn prepend_search_path(helper: &Path, inherited: Option<&OsStr>) -> io::Result<OsString> {
    let inherited: Vec<_> = inherited.map(|v| env::split_paths(v).collect()).unwrap_or_default();
    env::join_paths(iter::once(helper.to_path_buf()).chain(inherited))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// Read `output` to EOF. On a read error the child is killed and reaped before returning.
fn collect_output<R: Read>(child: &mut Child, mut output: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Err(e) = output.read_to_end(&mut buf) {
        tracing::warn!(pid = child.id(), error = %e, "lost test output, killing child");
        // already exited is fine; the wait below still reaps it
        let _ = child.kill();
        child.wait()?;
        return Err(e);
    }
    Ok(buf)
}
