//! Activity log with size-based rotation.
//!
//! Lines are `[YYYY-MM-DD HH:MM:SS] message`. Before each write the current
//! file is renamed to `activity_<YYYYMMDD_HHMMSS>.log` once it has reached
//! `max_bytes`; nothing is dropped, only moved.
//!
//! Rotation and append run under `activity.log.lock`, so writers in other
//! threads or processes never race on the rename.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::task::CREATED_AT_FORMAT;

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
    max_bytes: u64,
}

impl ActivityLog {
    pub fn new(path: PathBuf, max_bytes: u64) -> Self {
        Self { path, max_bytes }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn lock_path(&self) -> PathBuf {
        lock::lock_path_for(&self.path)
    }

    /// Append one timestamped line, rotating first if needed
    pub fn log(&self, message: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let _lock = FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        self.rotate_unlocked()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "[{}] {}",
            Local::now().format(CREATED_AT_FORMAT),
            message
        )?;
        Ok(())
    }

    /// Rename the current file aside when it has reached the threshold.
    ///
    /// Returns the backup path when a rotation happened.
    pub fn rotate_if_needed(&self) -> Result<Option<PathBuf>> {
        let _lock = FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)?;
        self.rotate_unlocked()
    }

    fn rotate_unlocked(&self) -> Result<Option<PathBuf>> {
        let size = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if size < self.max_bytes {
            return Ok(None);
        }

        let backup = self.reserve_backup_path()?;
        fs::rename(&self.path, &backup)?;
        tracing::info!(backup = %backup.display(), size, "activity log rotated");
        Ok(Some(backup))
    }

    /// Last `lines` lines, oldest first
    pub fn tail(&self, lines: usize) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let all: Vec<&str> = content.lines().collect();
        let start = all.len().saturating_sub(lines);
        Ok(all[start..]
            .iter()
            .map(|line| line.trim().to_string())
            .collect())
    }

    /// Claim a backup name that no other file holds.
    ///
    /// The name is created empty with `create_new` and then replaced by the
    /// rename, so an existing backup is never overwritten.
    fn reserve_backup_path(&self) -> Result<PathBuf> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("activity");
        let stamp = Local::now().format("%Y%m%d_%H%M%S");

        let mut candidate = dir.join(format!("{stem}_{stamp}.log"));
        let mut counter = 1;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(_) => return Ok(candidate),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    candidate = dir.join(format!("{stem}_{stamp}_{counter}.log"));
                    counter += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
