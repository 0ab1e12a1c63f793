//! Daily report notes.
//!
//! One plain-text file per calendar day, append-only, each line
//! `[YYYY-MM-DD HH:MM:SS] note`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::task::CREATED_AT_FORMAT;

#[derive(Debug, Clone)]
pub struct ReportBook {
    dir: PathBuf,
}

impl ReportBook {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Report file for the day containing `at`
    pub fn path_for(&self, at: &DateTime<Local>) -> PathBuf {
        self.dir
            .join(format!("report_{}.txt", at.format("%Y-%m-%d")))
    }

    /// Append a note to today's report and return the file written
    pub fn append_note(&self, text: &str) -> Result<PathBuf> {
        self.append_note_at(text, &Local::now())
    }

    pub fn append_note_at(&self, text: &str, at: &DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(at);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "[{}] {}", at.format(CREATED_AT_FORMAT), text)?;
        Ok(path)
    }
}
