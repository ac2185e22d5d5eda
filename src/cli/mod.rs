//! CLI module for checkrun
//!
//! This module provides the command-line interface for the harness.
//!
//! ## Commands
//!
//! - *(none)* / `suite` - Run every phase for every interpreter found
//! - `phase [dir]` - Run the test files of one phase directory
//! - `interpreters` - Show which interpreters the suite would use
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use checkrun_core::conventions::STATUS_COLUMN_WIDTH;
use checkrun_core::{PhaseId, phases};
use clap::{Args, Parser, Subcommand};

use crate::harness::HarnessError;
use crate::version::CHECKRUN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        // Debug on a miette report renders the diagnostic (code, help) for the terminal
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run test phases across interpreters and report pass/fail per test file
#[derive(Parser, Debug)]
#[command(name = "checkrun")]
#[command(version = CHECKRUN_VERSION)]
#[command(about = "Run test phases across interpreters and report pass/fail per test file", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Suite options (used when no subcommand is given)
    #[command(flatten)]
    pub suite: SuiteArgs,
}

/// Options of a suite run.
#[derive(Args, Debug, Clone, Default)]
pub struct SuiteArgs {
    /// Project root containing the `tests/<phase>` directories
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
    /// Interpreter to use instead of probing PATH (repeatable, runs in the given order)
    #[arg(short = 'i', long = "interpreter", value_name = "PATH")]
    pub interpreters: Vec<PathBuf>,
    /// Only run these phases (repeatable); they still run in unit, integration, install order
    #[arg(short = 'p', long = "phase", value_name = "PHASE", value_parser = parse_phase)]
    pub phases: Vec<PhaseId>,
    /// Show per-file timings and a phase summary
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every phase for every interpreter (the default)
    Suite(SuiteArgs),

    /// Run the test files of a single phase directory
    Phase {
        /// Directory containing test_*.py files
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
        /// Phase name used for the header line
        #[arg(long, value_name = "PHASE", default_value = "unit", value_parser = parse_phase)]
        phase: PhaseId,
        /// Interpreter to run test files with (default: $PYTHON, then python3 on PATH)
        #[arg(short = 'i', long, value_name = "PATH")]
        interpreter: Option<PathBuf>,
        /// Directory prepended to PYTHONPATH (default: two levels above DIR)
        #[arg(long, value_name = "DIR")]
        helper_dir: Option<PathBuf>,
        /// Only run test files whose name contains this keyword
        #[arg(short = 'k', value_name = "EXPR")]
        filter: Option<String>,
        /// Width of the file name column
        #[arg(long, value_name = "N", default_value_t = STATUS_COLUMN_WIDTH)]
        width: usize,
        /// Show per-file timings and a phase summary
        #[arg(short, long)]
        verbose: bool,
        /// List the test files that would run, without running them
        #[arg(long)]
        list: bool,
    },

    /// Show the interpreters found on PATH, in the order the suite uses them
    Interpreters,
}

fn parse_phase(s: &str) -> Result<PhaseId, String> {
    phases::from_str(s).ok_or_else(|| {
        let known: Vec<_> = phases::PHASES.iter().map(|p| p.canonical).collect();
        format!("unknown phase '{}' (expected one of: {})", s, known.join(", "))
    })
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        None => commands::run_suite(&cli.suite),
        Some(Command::Suite(args)) => commands::run_suite(&args),
        Some(Command::Phase {
            dir,
            phase,
            interpreter,
            helper_dir,
            filter,
            width,
            verbose,
            list,
        }) => {
            let options = commands::PhaseOptions {
                dir,
                phase,
                interpreter,
                helper_dir,
                filter,
                width,
                verbose,
            };
            if list {
                commands::list_phase(&options)
            } else {
                commands::run_phase(&options)
            }
        }
        Some(Command::Interpreters) => commands::list_interpreters(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_arguments_runs_suite() {
        let cli = Cli::try_parse_from(["checkrun"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.suite.root, PathBuf::from("."));
        assert!(cli.suite.interpreters.is_empty());
        assert!(cli.suite.phases.is_empty());
    }

    #[test]
    fn test_cli_parse_suite_flags() {
        let cli = Cli::try_parse_from([
            "checkrun", "--root", "/srv/project", "-i", "/usr/bin/python3", "-p", "install", "-p", "unit",
        ])
        .unwrap();
        assert_eq!(cli.suite.root, PathBuf::from("/srv/project"));
        assert_eq!(cli.suite.interpreters, vec![PathBuf::from("/usr/bin/python3")]);
        assert_eq!(cli.suite.phases, vec![PhaseId::Install, PhaseId::Unit]);
    }

    #[test]
    fn test_cli_parse_suite_subcommand() {
        let cli = Cli::try_parse_from(["checkrun", "suite", "-v"]).unwrap();
        if let Some(Command::Suite(args)) = cli.command {
            assert!(args.verbose);
        } else {
            panic!("Expected Suite command");
        }
    }

    #[test]
    fn test_cli_parse_phase() {
        let cli = Cli::try_parse_from(["checkrun", "phase", "tests/unit", "-k", "scan", "--list"]).unwrap();
        if let Some(Command::Phase {
            dir,
            phase,
            filter,
            width,
            list,
            ..
        }) = cli.command
        {
            assert_eq!(dir, PathBuf::from("tests/unit"));
            assert_eq!(phase, PhaseId::Unit);
            assert_eq!(filter.as_deref(), Some("scan"));
            assert_eq!(width, STATUS_COLUMN_WIDTH);
            assert!(list);
        } else {
            panic!("Expected Phase command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_phase() {
        assert!(Cli::try_parse_from(["checkrun", "-p", "smoke"]).is_err());
    }

    #[test]
    fn test_harness_error_keeps_failure_code() {
        let err: CliError = HarnessError::NoInterpreter {
            probed: "python2, python3".to_string(),
        }
        .into();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("no interpreter found on PATH"));
    }
}
