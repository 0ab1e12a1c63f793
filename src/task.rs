//! Task management for autodeck.
//!
//! The whole collection lives in one pretty-printed JSON array
//! (`data/tasks.json`). Every mutation is a full load-mutate-save cycle run
//! under the store lock, so concurrent writers never lose updates.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::storage::Storage;

/// Value stored for a blank platform or frequency
pub const UNSPECIFIED: &str = "Unspecified";

/// Format of `Task::created_at`
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TASK_ID_PREFIX: &str = "T";

fn unspecified() -> String {
    UNSPECIFIED.to_string()
}

fn default_active() -> bool {
    true
}

/// A named automation rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default = "unspecified")]
    pub platform: String,
    #[serde(default = "unspecified")]
    pub frequency: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: String,
}

impl Task {
    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Paused"
        }
    }
}

/// Input for `TaskStore::create`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

impl NewTask {
    pub fn new(
        name: impl Into<String>,
        platform: Option<String>,
        frequency: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            platform,
            frequency,
        }
    }
}

/// One way of pointing at a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based position in the stored order
    ByPosition(usize),
    /// Exact id match
    ById(String),
}

impl Selector {
    /// Index into `tasks` this selector points at, if any
    pub fn resolve(&self, tasks: &[Task]) -> Option<usize> {
        match self {
            Selector::ByPosition(position) => {
                if *position >= 1 && *position <= tasks.len() {
                    Some(position - 1)
                } else {
                    None
                }
            }
            Selector::ById(id) => tasks.iter().position(|task| task.id == *id),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::ByPosition(position) => write!(f, "#{position}"),
            Selector::ById(id) => f.write_str(id),
        }
    }
}

/// Ordered selector candidates built from user text.
///
/// All-digit text tries the position first and then the literal text as an
/// id; anything else is an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    raw: String,
    candidates: Vec<Selector>,
}

impl TaskQuery {
    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(Error::InvalidArgument(
                "task selector cannot be empty".to_string(),
            ));
        }

        let mut candidates = Vec::with_capacity(2);
        if raw.chars().all(|ch| ch.is_ascii_digit()) {
            if let Ok(position) = raw.parse::<usize>() {
                candidates.push(Selector::ByPosition(position));
            }
        }
        candidates.push(Selector::ById(raw.to_string()));

        Ok(Self {
            raw: raw.to_string(),
            candidates,
        })
    }

    pub fn candidates(&self) -> &[Selector] {
        &self.candidates
    }

    /// First candidate that matches, as an index into `tasks`
    pub fn resolve(&self, tasks: &[Task]) -> Option<usize> {
        self.candidates
            .iter()
            .find_map(|selector| selector.resolve(tasks))
    }
}

impl From<Selector> for TaskQuery {
    fn from(selector: Selector) -> Self {
        Self {
            raw: selector.to_string(),
            candidates: vec![selector],
        }
    }
}

impl fmt::Display for TaskQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Persistent task collection
#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: Storage,
    lock_timeout_ms: u64,
}

impl TaskStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.storage.tasks_file()
    }

    pub fn lock_path(&self) -> PathBuf {
        lock::lock_path_for(&self.tasks_path())
    }

    /// Read the collection, creating an empty file when none exists
    pub fn load(&self) -> Result<Vec<Task>> {
        self.locked(|| self.load_unlocked())
    }

    /// Replace the stored collection
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        self.locked(|| self.save_unlocked(tasks))
    }

    pub fn list(&self) -> Result<Vec<Task>> {
        self.load()
    }

    pub fn create(&self, new_task: NewTask) -> Result<Task> {
        let name = new_task.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "task name cannot be empty".to_string(),
            ));
        }
        let platform = or_unspecified(new_task.platform.as_deref());
        let frequency = or_unspecified(new_task.frequency.as_deref());

        self.locked(|| {
            let mut tasks = self.load_unlocked()?;
            let task = Task {
                id: generate_task_id(&tasks),
                name: name.to_string(),
                platform,
                frequency,
                active: true,
                created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
            };
            tasks.push(task.clone());
            self.save_unlocked(&tasks)?;
            tracing::debug!(id = %task.id, total = tasks.len(), "task created");
            Ok(task)
        })
    }

    pub fn find(&self, query: &TaskQuery) -> Result<Task> {
        let tasks = self.load()?;
        let index = query
            .resolve(&tasks)
            .ok_or_else(|| Error::TaskNotFound(query.to_string()))?;
        Ok(tasks[index].clone())
    }

    /// Flip `active` on the selected task and persist
    pub fn toggle(&self, query: &TaskQuery) -> Result<Task> {
        self.locked(|| {
            let mut tasks = self.load_unlocked()?;
            let index = query
                .resolve(&tasks)
                .ok_or_else(|| Error::TaskNotFound(query.to_string()))?;
            tasks[index].active = !tasks[index].active;
            let task = tasks[index].clone();
            self.save_unlocked(&tasks)?;
            tracing::debug!(id = %task.id, active = task.active, "task toggled");
            Ok(task)
        })
    }

    /// Remove the selected task and persist; returns the removed task
    pub fn delete(&self, query: &TaskQuery) -> Result<Task> {
        self.locked(|| {
            let mut tasks = self.load_unlocked()?;
            let index = query
                .resolve(&tasks)
                .ok_or_else(|| Error::TaskNotFound(query.to_string()))?;
            let removed = tasks.remove(index);
            self.save_unlocked(&tasks)?;
            tracing::debug!(id = %removed.id, total = tasks.len(), "task deleted");
            Ok(removed)
        })
    }

    fn locked<T>(&self, op: impl FnOnce() -> Result<T>) -> Result<T> {
        let _lock = FileLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        op()
    }

    fn load_unlocked(&self) -> Result<Vec<Task>> {
        let path = self.tasks_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "initializing empty task store");
                self.save_unlocked(&[])?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(Error::Io(err)),
        };

        let tasks: Vec<Task> =
            serde_json::from_str(&content).map_err(|err| Error::StorageCorruption {
                path: path.clone(),
                message: err.to_string(),
            })?;

        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(Error::StorageCorruption {
                    path,
                    message: format!("duplicate task id '{}'", task.id),
                });
            }
        }

        Ok(tasks)
    }

    fn save_unlocked(&self, tasks: &[Task]) -> Result<()> {
        self.storage.write_json(&self.tasks_path(), tasks)
    }
}

fn or_unspecified(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => unspecified(),
    }
}

fn generate_task_id(existing: &[Task]) -> String {
    let taken: HashSet<&str> = existing.iter().map(|task| task.id.as_str()).collect();
    loop {
        let candidate = format!("{}{}", TASK_ID_PREFIX, Ulid::new());
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }
}
