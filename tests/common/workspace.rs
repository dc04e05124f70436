//! Temporary directory layout for file-based tests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temp directory with `frames/` for input and `out/` for output.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("frames")).expect("create frames dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn frames_dir(&self) -> PathBuf {
        self.root().join("frames")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("out")
    }

    /// Write an input frame and return its path
    pub fn write_frame(&self, name: &str, png: &[u8]) -> PathBuf {
        let path = self.frames_dir().join(name);
        std::fs::write(&path, png).expect("write frame");
        path
    }

    /// Write a config file and return its path
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.root().join("config.yaml");
        std::fs::write(&path, yaml).expect("write config");
        path
    }

    pub fn read_output(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.output_dir().join(name)).expect("read output frame")
    }
}
