//! End-to-end tests for the phase runner with real child processes.
//!
//! Test files are shell scripts run by `/bin/sh`, which stands in for the interpreter: the harness
//! only cares about exit codes and output.

#![cfg(unix)]

use std::fs;
use std::path::Path;

use checkrun::harness::discovery::FsDiscovery;
use checkrun::harness::executor::ProcessExecutor;
use checkrun::harness::reporter::ConsoleReporter;
use checkrun::harness::{HarnessError, Interpreter, PhaseConfig, run_phase};
use checkrun::PhaseId;

fn sh() -> Interpreter {
    Interpreter::new("sh", "/bin/sh")
}

fn write_test(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

/// Run the phase in `dir`, returning (exit code, rendered table).
fn run_dir(dir: &Path) -> (i32, String) {
    let config = PhaseConfig::new(PhaseId::Unit, dir, sh())
        .with_column_width(16)
        .resolve()
        .unwrap();
    let mut reporter = ConsoleReporter::new(Vec::new(), config.column_width, false);
    let report = run_phase(&config, &FsDiscovery, &ProcessExecutor, &mut reporter).unwrap();
    (report.exit_code(), String::from_utf8(reporter.into_inner()).unwrap())
}

#[test]
fn test_three_files_middle_one_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_test(dir.path(), "test_a.py", "echo quiet a\n");
    write_test(dir.path(), "test_b.py", "echo broken >&2\nexit 1\n");
    write_test(dir.path(), "test_c.py", "echo quiet c\n");

    let (code, out) = run_dir(dir.path());

    assert_eq!(code, 1);
    insta::assert_snapshot!(out, @r"
Unit tests:
test_a.py        ... [ pass ]
test_b.py        ... [ FAIL ]

broken

test_c.py        ... [ pass ]
");
}

#[test]
fn test_empty_directory_prints_header_only() {
    let dir = tempfile::tempdir().unwrap();
    write_test(dir.path(), "helpers.py", "exit 1\n");

    let (code, out) = run_dir(dir.path());

    assert_eq!(code, 0);
    assert_eq!(out, "Unit tests:\n");
}

#[test]
fn test_bare_prefix_file_runs_and_fails_phase() {
    let dir = tempfile::tempdir().unwrap();
    write_test(dir.path(), "test_.py", "echo nameless\nexit 1\n");

    let (code, out) = run_dir(dir.path());

    assert_eq!(code, 1);
    assert_eq!(out, "Unit tests:\ntest_.py         ... [ FAIL ]\n\nnameless\n\n");
}

#[test]
fn test_all_passing_files() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["test_one.py", "test_two.py"] {
        write_test(dir.path(), name, "exit 0\n");
    }

    let (code, out) = run_dir(dir.path());

    assert_eq!(code, 0);
    assert_eq!(out.lines().filter(|l| l.ends_with("[ pass ]")).count(), 2);
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_crash_and_assertion_failure_look_the_same() {
    let dir = tempfile::tempdir().unwrap();
    write_test(dir.path(), "test_assert.py", "echo AssertionError\nexit 1\n");
    write_test(dir.path(), "test_crash.py", "kill -9 $$\n");

    let (code, out) = run_dir(dir.path());

    assert_eq!(code, 1);
    assert!(out.contains("test_assert.py   ... [ FAIL ]\n\nAssertionError\n\n"));
    assert!(out.contains("test_crash.py    ... [ FAIL ]\n"));
}

#[test]
fn test_helper_dir_defaults_to_project_root() {
    let project = tempfile::tempdir().unwrap();
    let unit = project.path().join("tests").join("unit");
    fs::create_dir_all(&unit).unwrap();
    // fails unless PYTHONPATH starts with the project root
    write_test(
        &unit,
        "test_path.py",
        "root=$(cd \"${PYTHONPATH%%:*}\" && pwd -P)\n[ \"$root\" = \"$(cd ../.. && pwd -P)\" ] || { echo \"bad: $PYTHONPATH\"; exit 1; }\n",
    );

    let (code, out) = run_dir(&unit);
    assert_eq!(code, 0, "{out}");
}

#[test]
fn test_relative_directory_does_not_depend_on_cwd() {
    let dir = tempfile::tempdir().unwrap();
    let config = PhaseConfig::new(PhaseId::Unit, dir.path(), sh()).resolve().unwrap();
    assert!(config.directory.is_absolute());
    assert_eq!(config.directory, dir.path().canonicalize().unwrap());
}

#[test]
fn test_missing_directory_is_fatal() {
    let err = PhaseConfig::new(PhaseId::Unit, "/no/such/checkrun/unit", sh())
        .resolve()
        .unwrap_err();
    assert!(matches!(err, HarnessError::Directory { .. }));
}
