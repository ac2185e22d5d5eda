//! Fatal harness conditions.
//!
//! A test file failing is *not* an error: it is a [`Status::Fail`](checkrun_core::Status) recorded
//! by the phase runner. Only conditions that prevent the harness from doing its job at all end up
//! here.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("no interpreter found on PATH (probed: {probed})")]
    #[diagnostic(
        code(checkrun::no_interpreter),
        help("install one of the probed interpreters or pass --interpreter <PATH>")
    )]
    NoInterpreter { probed: String },

    #[error("interpreter '{name}' could not be resolved")]
    #[diagnostic(
        code(checkrun::interpreter_not_found),
        help("set PYTHON to an executable or pass --interpreter <PATH>")
    )]
    InterpreterNotFound { name: String },

    #[error("directory '{}' is not usable: {source}", path.display())]
    #[diagnostic(
        code(checkrun::directory),
        help("pass an existing directory (the project root or a phase directory)")
    )]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list test files in '{}': {source}", path.display())]
    #[diagnostic(code(checkrun::read_dir))]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start phase runner '{}': {source}", path.display())]
    #[diagnostic(
        code(checkrun::runner_spawn),
        help("external phase runners must exist and be executable")
    )]
    RunnerSpawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    #[diagnostic(code(checkrun::io))]
    Io(#[from] io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
