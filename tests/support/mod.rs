#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use autodeck::platform::PLATFORMS;
use autodeck::task::Task;
use tempfile::TempDir;

/// Temporary autodeck home directory
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir().join("tasks.json")
    }

    pub fn activity_log(&self) -> PathBuf {
        self.dir.path().join("logs").join("activity.log")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_tasks(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(self.tasks_file())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// autodeck command bound to this home, with a clean token environment
    pub fn cmd(&self) -> Command {
        let mut cmd = autodeck_cmd();
        cmd.env("AUTODECK_HOME", self.path());
        cmd
    }
}

pub fn autodeck_cmd() -> Command {
    let mut cmd = Command::cargo_bin("autodeck").expect("binary");
    cmd.env_remove("AUTODECK_HOME");
    cmd.env_remove("RUST_LOG");
    for (_, env_var) in PLATFORMS {
        cmd.env_remove(env_var);
    }
    cmd
}
