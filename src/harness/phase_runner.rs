//! Phase runner: run every test file of one directory and aggregate a single exit code.
//!
//! Individual failures are contained: every discovered file is always attempted, and the phase
//! exit code is computed only after the last one. Only an unusable directory, an unresolvable
//! interpreter, or a listing error aborts the phase (as a [`HarnessError`]).

use std::time::{Duration, Instant};

use checkrun_core::status::aggregate;
use checkrun_core::{PhaseId, Status};

use super::config::PhaseConfig;
use super::discovery::{FsDiscovery, TestDiscovery, TestFile};
use super::errors::HarnessResult;
use super::executor::{ProcessExecutor, TestExecutor};
use super::reporter::{ConsoleReporter, PhaseReporter};

/// Outcome of one test file, handed to the reporter and then dropped.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file: TestFile,
    pub status: Status,
    /// Combined stdout and stderr of the child
    pub output: Vec<u8>,
    pub duration: Duration,
}

/// Summary of a finished phase.
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: PhaseId,
    /// Every discovered file with its status, in run order
    pub results: Vec<(TestFile, Status)>,
    pub duration: Duration,
}

impl PhaseReport {
    /// 1 if any file failed, else 0 (also 0 when nothing was discovered).
    pub fn exit_code(&self) -> i32 {
        aggregate(self.results.iter().map(|(_, status)| *status))
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, s)| s.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }
}

/// Run one phase.
///
/// `config` must already be resolved (see [`PhaseConfig::resolve`]).
#[tracing::instrument(skip_all, fields(phase = %config.phase, dir = %config.directory.display()))]
pub fn run_phase(
    config: &PhaseConfig,
    discovery: &dyn TestDiscovery,
    executor: &dyn TestExecutor,
    reporter: &mut dyn PhaseReporter,
) -> HarnessResult<PhaseReport> {
    let start = Instant::now();
    let files = discovery.discover(&config.directory, config.filter.as_deref())?;
    tracing::info!(count = files.len(), "discovered test files");

    reporter.on_phase_start(config.phase)?;

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        reporter.on_file_start(&file.name)?;
        let outcome = run_file(config, executor, file);
        tracing::debug!(file = %outcome.file.name, status = ?outcome.status, "test file finished");
        reporter.on_file_complete(&outcome)?;
        results.push((outcome.file, outcome.status));
    }

    let report = PhaseReport {
        phase: config.phase,
        results,
        duration: start.elapsed(),
    };
    reporter.on_phase_complete(&report)?;
    tracing::info!(
        passed = report.passed(),
        failed = report.failed(),
        exit_code = report.exit_code(),
        "phase finished"
    );
    Ok(report)
}

/// Resolve `config` and run it with the filesystem discovery, process executor and console
/// reporter. Returns the phase exit code.
pub fn run_phase_to_stdout(config: PhaseConfig) -> HarnessResult<i32> {
    let config = config.resolve()?;
    let mut reporter = ConsoleReporter::stdout(config.column_width, config.verbose);
    let report = run_phase(&config, &FsDiscovery, &ProcessExecutor, &mut reporter)?;
    Ok(report.exit_code())
}

fn run_file(config: &PhaseConfig, executor: &dyn TestExecutor, file: TestFile) -> FileOutcome {
    let start = Instant::now();
    match executor.execute(&file, config) {
        Ok(execution) => FileOutcome {
            status: execution.status(),
            output: execution.output,
            duration: execution.duration,
            file,
        },
        Err(e) => {
            tracing::warn!(file = %file.name, error = %e, "failed to run test file");
            FileOutcome {
                status: Status::Fail,
                output: format!("failed to run {} with {}: {e}", file.name, config.interpreter).into_bytes(),
                duration: start.elapsed(),
                file,
            }
        }
    }
}
