//! Property-based tests for the phase runner
//!
//! Discovery and execution are replaced with in-memory fakes so many random pass/fail mixes can be
//! checked without spawning processes.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::time::Duration;

use checkrun::harness::discovery::{TestDiscovery, TestFile};
use checkrun::harness::executor::{Execution, TestExecutor};
use checkrun::harness::reporter::ConsoleReporter;
use checkrun::harness::{HarnessResult, Interpreter, PhaseConfig, run_phase};
use checkrun::PhaseId;
use proptest::prelude::*;

struct Scripted {
    codes: HashMap<String, Option<i32>>,
    names: Vec<String>,
}

impl Scripted {
    fn new(codes: &[Option<i32>]) -> Self {
        let names: Vec<String> = (0..codes.len()).map(|i| format!("test_{i:03}.py")).collect();
        Self {
            codes: names.iter().cloned().zip(codes.iter().copied()).collect(),
            names,
        }
    }
}

impl TestDiscovery for Scripted {
    fn discover(&self, dir: &Path, _filter: Option<&str>) -> HarnessResult<Vec<TestFile>> {
        Ok(self.names.iter().map(|n| TestFile::new(n.clone(), dir.join(n))).collect())
    }
}

impl TestExecutor for Scripted {
    fn execute(&self, file: &TestFile, _config: &PhaseConfig) -> io::Result<Execution> {
        Ok(Execution {
            exit_code: self.codes[&file.name],
            output: format!("OUT<{}>", file.name).into_bytes(),
            duration: Duration::ZERO,
        })
    }
}

fn run(codes: &[Option<i32>]) -> (i32, String) {
    let scripted = Scripted::new(codes);
    let config = PhaseConfig::new(PhaseId::Unit, "/srv/tests/unit", Interpreter::new("python3", "/usr/bin/python3"));
    let mut reporter = ConsoleReporter::new(Vec::new(), config.column_width, false);
    let report = run_phase(&config, &scripted, &scripted, &mut reporter).unwrap();
    (report.exit_code(), String::from_utf8(reporter.into_inner()).unwrap())
}

fn exit_codes() -> impl Strategy<Value = Vec<Option<i32>>> {
    prop::collection::vec(prop_oneof![3 => Just(Some(0)), 1 => (1i32..256).prop_map(Some), 1 => Just(None)], 0..24)
}

proptest! {
    /// Property: the phase exit code is 0 iff every file exited 0
    #[test]
    fn exit_code_is_zero_iff_all_passed(codes in exit_codes()) {
        let (code, _) = run(&codes);
        let all_passed = codes.iter().all(|c| *c == Some(0));
        prop_assert_eq!(code == 0, all_passed);
        prop_assert!(code == 0 || code == 1);
    }

    /// Property: one status line per discovered file
    #[test]
    fn one_status_line_per_file(codes in exit_codes()) {
        let (_, out) = run(&codes);
        let status_lines = out
            .lines()
            .filter(|l| l.ends_with("[ pass ]") || l.ends_with("[ FAIL ]"))
            .count();
        prop_assert_eq!(status_lines, codes.len());
    }

    /// Property: output is dumped exactly for failing files, between blank lines
    #[test]
    fn output_dumped_only_for_failures(codes in exit_codes()) {
        let (_, out) = run(&codes);
        for (i, code) in codes.iter().enumerate() {
            let name = format!("test_{i:03}.py");
            let block = format!("\n\nOUT<{name}>\n\n");
            if *code == Some(0) {
                let marker = format!("OUT<{name}>");
                prop_assert!(!out.contains(&marker));
            } else {
                prop_assert!(out.contains(&block), "missing block for {}", name);
            }
        }
    }
}
