//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::env;
use std::path::PathBuf;

use checkrun_core::PhaseId;

use crate::harness::config::resolve_directory;
use crate::harness::discovery::{FsDiscovery, TestDiscovery};
use crate::harness::interpreter::{self, Interpreter};
use crate::harness::{HarnessError, PhaseConfig, ProjectPhaseInvoker, SuiteConfig, SuiteRunner, run_phase_to_stdout};
use checkrun_core::conventions::INTERPRETER_CANDIDATES;

use super::{CliResult, ExitCode, SuiteArgs};

/// Options of the `phase` subcommand.
#[derive(Debug, Clone)]
pub struct PhaseOptions {
    pub dir: PathBuf,
    pub phase: PhaseId,
    pub interpreter: Option<PathBuf>,
    pub helper_dir: Option<PathBuf>,
    pub filter: Option<String>,
    pub width: usize,
    pub verbose: bool,
}

/// Run the suite: every selected phase for every interpreter.
pub fn run_suite(args: &SuiteArgs) -> CliResult<ExitCode> {
    let config = SuiteConfig::new(&args.root)
        .with_phases(args.phases.clone())
        .with_interpreters(args.interpreters.iter().map(|p| p.clone().into_os_string()).collect())
        .with_verbose(args.verbose)
        .resolve()?;

    let interpreters = suite_interpreters(&config)?;
    tracing::info!(
        root = %config.root.display(),
        interpreters = interpreters.len(),
        "starting suite"
    );

    let phases = config.selected_phases();
    let mut invoker = ProjectPhaseInvoker::new(config);
    let code = SuiteRunner::stdout().run(&interpreters, &phases, &mut invoker)?;
    Ok(ExitCode(code))
}

/// Run one phase directory and exit with its aggregate code.
pub fn run_phase(options: &PhaseOptions) -> CliResult<ExitCode> {
    let interpreter = interpreter::select_from_env(options.interpreter.as_deref().map(|p| p.as_os_str()))?;
    let code = run_phase_to_stdout(phase_config(options, interpreter))?;
    Ok(ExitCode(code))
}

/// Print the test files a phase run would execute, one per line.
pub fn list_phase(options: &PhaseOptions) -> CliResult<ExitCode> {
    // listing never runs anything, so no interpreter is resolved
    let directory = resolve_directory(&options.dir)?;
    let files = FsDiscovery.discover(&directory, options.filter.as_deref())?;

    for file in &files {
        println!("{}", file.name);
    }
    if options.verbose {
        println!("{} test file(s) in {}", files.len(), directory.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the interpreters probed on PATH.
pub fn list_interpreters() -> CliResult<ExitCode> {
    let found = interpreter::probe_from_env();
    if found.is_empty() {
        return Err(HarnessError::NoInterpreter {
            probed: INTERPRETER_CANDIDATES.join(", "),
        }
        .into());
    }
    for interpreter in found {
        println!("{:<10} {}", interpreter.name, interpreter.path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn phase_config(options: &PhaseOptions, interpreter: Interpreter) -> PhaseConfig {
    let mut config = PhaseConfig::new(options.phase, &options.dir, interpreter)
        .with_column_width(options.width)
        .with_verbose(options.verbose);
    if let Some(helper_dir) = &options.helper_dir {
        config = config.with_helper_dir(helper_dir);
    }
    if let Some(filter) = &options.filter {
        config = config.with_filter(filter);
    }
    config
}

/// Explicit interpreters when given (in order), otherwise those probed on PATH.
fn suite_interpreters(config: &SuiteConfig) -> CliResult<Vec<Interpreter>> {
    if config.interpreters.is_empty() {
        return Ok(interpreter::probe_from_env());
    }
    let search_path = env::var_os("PATH");
    let resolved = config
        .interpreters
        .iter()
        .map(|reference| Interpreter::resolve(reference, search_path.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(resolved)
}
