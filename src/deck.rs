//! Shared context for every front end (CLI, console menu, web).
//!
//! Bundles the task store, report book, activity log and platform tokens for
//! one home directory, and pairs each user-facing operation with its
//! activity-log line.

use std::path::PathBuf;

use serde::Serialize;

use crate::activity::ActivityLog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export;
use crate::platform::PlatformTokens;
use crate::report::ReportBook;
use crate::storage::Storage;
use crate::task::{NewTask, Task, TaskQuery, TaskStore};

#[derive(Debug, Clone)]
pub struct Deck {
    config: Config,
    store: TaskStore,
    reports: ReportBook,
    activity: ActivityLog,
    tokens: PlatformTokens,
}

/// What `Deck::init` had to create
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub home: PathBuf,
    pub config: bool,
    pub data_dir: bool,
    pub tasks_file: bool,
}

impl Deck {
    /// Open a home directory with its config file and environment tokens
    pub fn open(home: PathBuf) -> Self {
        let config = Config::load_from_home(&home);
        Self::with_config(home, config, PlatformTokens::from_env())
    }

    pub fn with_config(home: PathBuf, config: Config, tokens: PlatformTokens) -> Self {
        let storage = Storage::new(home, &config);
        let reports = ReportBook::new(storage.reports_dir());
        let activity = ActivityLog::new(storage.activity_log_file(), config.log.max_bytes);
        let store = TaskStore::new(storage);
        Self {
            config,
            store,
            reports,
            activity,
            tokens,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        self.store.storage()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn reports(&self) -> &ReportBook {
        &self.reports
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn tokens(&self) -> &PlatformTokens {
        &self.tokens
    }

    /// Create directories, an empty task file and a default config
    pub fn init(&self) -> Result<InitReport> {
        let storage = self.storage();
        let data_dir = !storage.is_initialized();
        storage.init_dirs()?;

        let tasks_file = !storage.tasks_file().exists();
        if tasks_file {
            self.store.load()?;
        }

        let config_path = storage.config_file();
        let config = if config_path.exists() {
            if !config_path.is_file() {
                return Err(Error::OperationFailed(format!(
                    "config path exists but is not a file: {}",
                    config_path.display()
                )));
            }
            false
        } else {
            self.config.save(&config_path)?;
            true
        };

        Ok(InitReport {
            home: storage.home().to_path_buf(),
            config,
            data_dir,
            tasks_file,
        })
    }

    /// Write an activity line; failures are reported, never raised
    pub fn log_event(&self, message: &str) {
        if let Err(err) = self.activity.log(message) {
            tracing::warn!(error = %err, "failed to write activity log");
        }
    }

    pub fn tasks(&self) -> Result<Vec<Task>> {
        self.store.list()
    }

    pub fn create_task(&self, new_task: NewTask) -> Result<Task> {
        let task = self.store.create(new_task)?;
        self.log_event(&format!(
            "Task created: {} [{}] ({})",
            task.name, task.platform, task.frequency
        ));
        Ok(task)
    }

    pub fn toggle_task(&self, query: &TaskQuery) -> Result<Task> {
        let task = self.store.toggle(query)?;
        let state = if task.active { "activated" } else { "paused" };
        self.log_event(&format!("Task {state}: {}", task.name));
        Ok(task)
    }

    pub fn delete_task(&self, query: &TaskQuery) -> Result<Task> {
        let task = self.store.delete(query)?;
        self.log_event(&format!("Task deleted: {}", task.name));
        Ok(task)
    }

    /// Append a note to today's report; blank notes are rejected
    pub fn add_note(&self, text: &str) -> Result<PathBuf> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidArgument("note cannot be empty".to_string()));
        }
        let path = self.reports.append_note(text)?;
        self.log_event(&format!("Note added to report: {text}"));
        Ok(path)
    }

    /// Export tasks to the CSV file; returns the path and row count
    pub fn export_tasks(&self) -> Result<(PathBuf, usize)> {
        let tasks = self.store.list()?;
        let path = self.storage().tasks_csv_file();
        let count = export::export_csv(&tasks, &path)?;
        self.log_event("Task CSV export generated");
        Ok((path, count))
    }

    pub fn recent_logs(&self, lines: usize) -> Result<Vec<String>> {
        self.activity.tail(lines)
    }
}
