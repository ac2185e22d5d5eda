//! Suite runner: every phase, for every interpreter, stopping at the first failure.
//!
//! Per interpreter the state is either "running phases" or "aborted". A phase exiting non-zero
//! ends the whole suite with that exit code; later phases and later interpreters never run.
//!
//! The working directory is never changed. Phase locations come from [`SuiteConfig`] and each child
//! gets its directory through `Command::current_dir`.

use std::io::{self, Write};
use std::process::Command;

use checkrun_core::conventions::{INTERPRETER_CANDIDATES, INTERPRETER_ENV_VAR};
use checkrun_core::phases::{self, PhaseKind};
use checkrun_core::status::{EXIT_FAILURE, EXIT_SUCCESS};
use checkrun_core::PhaseId;

use super::config::{PhaseConfig, SuiteConfig};
use super::errors::{HarnessError, HarnessResult};
use super::interpreter::Interpreter;
use super::phase_runner::run_phase_to_stdout;

/// Runs one phase for one interpreter and returns its exit code.
pub trait PhaseInvoker {
    fn invoke(&mut self, phase: PhaseId, interpreter: &Interpreter) -> HarnessResult<i32>;
}

/// Invokes the phases of a project laid out as `tests/<phase>/`.
///
/// `unit` runs in-process; the other phases run their external runner executable.
pub struct ProjectPhaseInvoker {
    config: SuiteConfig,
}

impl ProjectPhaseInvoker {
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    fn run_external(&self, phase: PhaseId, interpreter: &Interpreter) -> HarnessResult<i32> {
        let runner = self.config.runner_path(phase);
        tracing::debug!(runner = %runner.display(), "starting external phase runner");

        let status = Command::new(&runner)
            .current_dir(self.config.phase_directory(phase))
            .env(INTERPRETER_ENV_VAR, &interpreter.path)
            .status()
            .map_err(|source| HarnessError::RunnerSpawn {
                path: runner.clone(),
                source,
            })?;

        // killed by a signal: no code, still a failure
        Ok(status.code().unwrap_or(EXIT_FAILURE))
    }
}

impl PhaseInvoker for ProjectPhaseInvoker {
    fn invoke(&mut self, phase: PhaseId, interpreter: &Interpreter) -> HarnessResult<i32> {
        match phases::kind(phase) {
            PhaseKind::InProcess => {
                let config = PhaseConfig::new(phase, self.config.phase_directory(phase), interpreter.clone())
                    .with_verbose(self.config.verbose);
                run_phase_to_stdout(config)
            }
            PhaseKind::ExternalRunner => self.run_external(phase, interpreter),
        }
    }
}

/// Drives phases across interpreters.
pub struct SuiteRunner<W: Write> {
    out: W,
}

impl SuiteRunner<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> SuiteRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run `phases` (already in execution order) for each interpreter.
    ///
    /// ## Returns
    /// - `Ok(0)` when every phase passed for every interpreter.
    /// - `Ok(code)` with the first non-zero phase exit code otherwise.
    /// - `Err(HarnessError::NoInterpreter)` when `interpreters` is empty.
    #[tracing::instrument(skip_all, fields(interpreters = interpreters.len(), phases = phases.len()))]
    pub fn run(
        &mut self,
        interpreters: &[Interpreter],
        phases: &[PhaseId],
        invoker: &mut dyn PhaseInvoker,
    ) -> HarnessResult<i32> {
        if interpreters.is_empty() {
            return Err(HarnessError::NoInterpreter {
                probed: INTERPRETER_CANDIDATES.join(", "),
            });
        }

        for interpreter in interpreters {
            writeln!(self.out, "Using interpreter: {interpreter}")?;
            self.out.flush()?;

            for &phase in phases {
                let code = invoker.invoke(phase, interpreter)?;
                if code != EXIT_SUCCESS {
                    tracing::info!(%phase, interpreter = %interpreter, code, "phase failed, stopping suite");
                    return Ok(code);
                }
                tracing::debug!(%phase, interpreter = %interpreter, "phase passed");
            }
        }

        Ok(EXIT_SUCCESS)
    }
}
