//! Phase reporting.
//!
//! The phase runner emits events through [`PhaseReporter`]; [`ConsoleReporter`] renders the
//! fixed-width status table. Any other format (JSON, TAP, ...) is a matter of implementing the
//! trait.

use std::io::{self, Write};

use checkrun_core::status::{header_line, status_line};
use checkrun_core::{PhaseId, phases};

use super::phase_runner::{FileOutcome, PhaseReport};

/// Receives phase runner events, in order.
pub trait PhaseReporter {
    /// Called once before any file runs
    fn on_phase_start(&mut self, phase: PhaseId) -> io::Result<()>;

    /// Called when a test file is about to run
    fn on_file_start(&mut self, _name: &str) -> io::Result<()> {
        Ok(())
    }

    /// Called with the outcome of every file, including its captured output
    fn on_file_complete(&mut self, outcome: &FileOutcome) -> io::Result<()>;

    /// Called after the last file
    fn on_phase_complete(&mut self, _report: &PhaseReport) -> io::Result<()> {
        Ok(())
    }
}

/// Status table writer.
///
/// ```text
/// Unit tests:
/// test_a.py    ... [ pass ]
/// test_b.py    ... [ FAIL ]
///
/// <captured output of test_b.py>
///
/// test_c.py    ... [ pass ]
/// ```
pub struct ConsoleReporter<W: Write> {
    out: W,
    column_width: usize,
    verbose: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(column_width: usize, verbose: bool) -> Self {
        Self::new(io::stdout(), column_width, verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, column_width: usize, verbose: bool) -> Self {
        Self {
            out,
            column_width,
            verbose,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PhaseReporter for ConsoleReporter<W> {
    fn on_phase_start(&mut self, phase: PhaseId) -> io::Result<()> {
        writeln!(self.out, "{}", header_line(phases::title(phase)))?;
        self.out.flush()
    }

    fn on_file_complete(&mut self, outcome: &FileOutcome) -> io::Result<()> {
        let line = status_line(&outcome.file.name, outcome.status, self.column_width);
        if self.verbose {
            writeln!(self.out, "{line} ({}ms)", outcome.duration.as_millis())?;
        } else {
            writeln!(self.out, "{line}")?;
        }

        if !outcome.status.is_pass() {
            // output block: blank line, output without trailing newlines, blank line
            writeln!(self.out)?;
            self.out.write_all(trim_trailing_newlines(&outcome.output))?;
            writeln!(self.out)?;
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    fn on_phase_complete(&mut self, report: &PhaseReport) -> io::Result<()> {
        if self.verbose {
            writeln!(
                self.out,
                "{} passed, {} failed in {:.2}s",
                report.passed(),
                report.failed(),
                report.duration.as_secs_f64()
            )?;
        }
        self.out.flush()
    }
}

fn trim_trailing_newlines(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(0, |i| i + 1);
    &bytes[..end]
}
