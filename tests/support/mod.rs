#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tasker::Task;
use tempfile::TempDir;

/// Scratch working directory for one test, with helpers for the store file.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    /// Working directory seeded with an empty `tasks.json`.
    pub fn with_empty_store() -> std::io::Result<Self> {
        let dir = Self::new();
        dir.write_store("[]")?;
        Ok(dir)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_store(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file("tasks.json", contents)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".tasker.toml", contents)
    }

    pub fn read_store_raw(&self) -> std::io::Result<String> {
        fs::read_to_string(self.store_path())
    }

    pub fn read_store(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        Ok(tasker::load_all(&self.store_path())?)
    }

    /// `tasker` command running inside this directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = tasker_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}

/// `tasker` binary with the environment overrides cleared.
pub fn tasker_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tasker").expect("binary");
    cmd.env_remove("TASKER_FILE")
        .env_remove("TASKER_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}
