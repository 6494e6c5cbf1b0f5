//! Shared test utilities for hydrolayer integration tests.
//!
//! Fixture files must carry their exact dataset file name, so they are
//! written into a temporary directory rather than to anonymous temp files.

#![allow(dead_code)]

pub mod builders;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary directory holding layer fixture files
pub struct LayerFixture {
    dir: TempDir,
}

impl LayerFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create fixture directory"),
        }
    }

    /// Write `contents` under `file_name` and return the full path
    pub fn write(&self, file_name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Path inside the fixture directory that does not exist
    pub fn missing(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }
}
