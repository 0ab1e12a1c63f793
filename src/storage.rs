//! Storage layer for autodeck
//!
//! All state lives under one home directory:
//!
//! ```text
//! <home>/
//!   autodeck.toml                       # Optional configuration
//!   data/
//!     tasks.json                        # Pretty-printed task array
//!     tasks.json.lock                   # Store lock
//!     tasks_export.csv                  # Last CSV export
//!     reports/
//!       report_<YYYY-MM-DD>.txt         # One note file per day
//!   logs/
//!     activity.log                      # Current activity log
//!     activity_<YYYYMMDD_HHMMSS>.log    # Rotated backups
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;
use crate::lock;

const TASKS_FILE: &str = "tasks.json";
const TASKS_CSV_FILE: &str = "tasks_export.csv";
const REPORTS_DIR: &str = "reports";
const ACTIVITY_LOG_FILE: &str = "activity.log";

/// Storage manager for autodeck state
#[derive(Debug, Clone)]
pub struct Storage {
    home: PathBuf,
    data_dir: PathBuf,
    logs_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager for a home directory and its configuration
    pub fn new(home: PathBuf, config: &Config) -> Self {
        let data_dir = config.data_dir(&home);
        let logs_dir = config.logs_dir(&home);
        Self {
            home,
            data_dir,
            logs_dir,
        }
    }

    /// Storage with the default layout
    pub fn for_home(home: PathBuf) -> Self {
        Self::new(home, &Config::default())
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join(REPORTS_DIR)
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    pub fn tasks_csv_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_CSV_FILE)
    }

    pub fn activity_log_file(&self) -> PathBuf {
        self.logs_dir.join(ACTIVITY_LOG_FILE)
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Create the data, reports and logs directories
    pub fn init_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(self.reports_dir())?;
        fs::create_dir_all(&self.logs_dir)?;
        Ok(())
    }

    /// Check whether the data directory exists yet
    pub fn is_initialized(&self) -> bool {
        self.data_dir.exists()
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    /// Write pretty-printed JSON atomically
    pub fn write_json<T: Serialize + ?Sized>(&self, path: &Path, data: &T) -> Result<()> {
        let mut json = serde_json::to_string_pretty(data)?;
        json.push('\n');
        lock::write_atomic(path, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_follow_layout() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::for_home(temp.path().to_path_buf());

        assert_eq!(storage.tasks_file(), temp.path().join("data").join("tasks.json"));
        assert_eq!(
            storage.reports_dir(),
            temp.path().join("data").join("reports")
        );
        assert_eq!(
            storage.activity_log_file(),
            temp.path().join("logs").join("activity.log")
        );
        assert_eq!(storage.config_file(), temp.path().join("autodeck.toml"));
    }

    #[test]
    fn custom_dirs_from_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.data_dir = "state".to_string();
        config.paths.logs_dir = "var/log".to_string();
        let storage = Storage::new(temp.path().to_path_buf(), &config);

        assert_eq!(storage.tasks_file(), temp.path().join("state").join("tasks.json"));
        assert_eq!(
            storage.activity_log_file(),
            temp.path().join("var").join("log").join("activity.log")
        );
    }

    #[test]
    fn init_dirs_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::for_home(temp.path().to_path_buf());
        assert!(!storage.is_initialized());

        storage.init_dirs().unwrap();
        storage.init_dirs().unwrap();

        assert!(storage.is_initialized());
        assert!(storage.reports_dir().is_dir());
        assert!(storage.logs_dir().is_dir());
    }

    #[test]
    fn json_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::for_home(temp.path().to_path_buf());
        let path = storage.data_dir().join("sample.json");

        storage.write_json(&path, &vec!["a", "b"]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("]\n"));
        let read: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(read, vec!["a".to_string(), "b".to_string()]);
    }
}
