//! Test file discovery.
//!
//! The phase runner only sees the [`TestDiscovery`] trait, so listing can be swapped out (dry
//! runs, tests) without touching the run loop.

use std::fs;
use std::path::{Path, PathBuf};

use checkrun_core::conventions::is_test_file_name;

use super::errors::{HarnessError, HarnessResult};

/// A discovered test file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestFile {
    /// Bare file name, as printed on the status line (lossy for non UTF-8 names)
    pub name: String,
    /// Absolute path passed to the interpreter
    pub path: PathBuf,
}

impl TestFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Find the test files of one phase directory.
pub trait TestDiscovery {
    /// List test files in `dir`, sorted by name.
    ///
    /// When `filter` is set, only files whose name contains it are returned.
    fn discover(&self, dir: &Path, filter: Option<&str>) -> HarnessResult<Vec<TestFile>>;
}

/// Non-recursive filesystem listing using the `test_*.py` convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDiscovery;

impl TestDiscovery for FsDiscovery {
    fn discover(&self, dir: &Path, filter: Option<&str>) -> HarnessResult<Vec<TestFile>> {
        let read_dir_err = |source: std::io::Error| HarnessError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            // the real name stays in `path`; only the display name is lossy
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_test_file_name(&name) {
                continue;
            }
            if let Some(keyword) = filter {
                if !name.contains(keyword) {
                    continue;
                }
            }
            let path = entry.path();
            // follows symlinks, so a linked test file still counts
            if !path.is_file() {
                continue;
            }
            files.push(TestFile::new(name, path));
        }

        files.sort();
        Ok(files)
    }
}
