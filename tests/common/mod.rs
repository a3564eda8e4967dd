// Test utility module for blinkreact integration tests
#![allow(dead_code)]

use blinkreact::config::BlinkConfig;
use blinkreact::harness::ClockMode;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TODO_LIST: &str = include_str!("../data/TodoList.tsx");

/// A component file inside its own temporary directory.
pub struct ComponentFixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl ComponentFixture {
    pub fn new(file_name: &str, contents: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(file_name);
        std::fs::write(&path, contents).expect("write component");
        Self { dir, path }
    }

    pub fn todo_list() -> Self {
        Self::new("TodoList.tsx", TODO_LIST)
    }

    /// Sorted file names currently in the fixture directory.
    pub fn files(&self) -> Vec<String> {
        list_files(self.dir.path())
    }
}

pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read fixture dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Defaults with virtual harness time, so tests do not sleep.
pub fn virtual_time_config() -> BlinkConfig {
    let mut config = BlinkConfig::default();
    config.harness.clock = ClockMode::Virtual;
    config
}
