//! Report notes, log tail, CSV export and platform status commands.

use std::path::PathBuf;

use serde::Serialize;

use crate::deck::Deck;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::platform::PlatformStatus;

#[derive(Serialize)]
struct NoteOutput {
    path: PathBuf,
    text: String,
}

#[derive(Serialize)]
struct LogsOutput {
    path: PathBuf,
    rotate_at_bytes: u64,
    lines: Vec<String>,
}

#[derive(Serialize)]
struct ExportOutput {
    path: PathBuf,
    rows: usize,
}

#[derive(Serialize)]
struct PlatformsOutput {
    platforms: Vec<PlatformStatus>,
}

pub fn run_note(deck: &Deck, text: &str, output: OutputOptions) -> Result<()> {
    let path = deck.add_note(text)?;

    let mut human = HumanOutput::new("Note added");
    human.push_summary("Report", path.display().to_string());

    let data = NoteOutput {
        path,
        text: text.trim().to_string(),
    };
    emit_success(output, "note", &data, Some(&human))
}

pub fn run_logs(deck: &Deck, lines: Option<usize>, output: OutputOptions) -> Result<()> {
    let count = lines.unwrap_or(deck.config().log.tail_lines);
    let tail = deck.recent_logs(count)?;

    let mut human = HumanOutput::new("Recent activity");
    human.push_summary("Rotates at", format!("{} bytes", deck.activity().max_bytes()));
    if tail.is_empty() {
        human.push_summary("Lines", "none");
    }
    for line in &tail {
        human.push_detail(line.clone());
    }

    let data = LogsOutput {
        path: deck.activity().path().to_path_buf(),
        rotate_at_bytes: deck.activity().max_bytes(),
        lines: tail,
    };
    emit_success(output, "logs", &data, Some(&human))
}

pub fn run_export(deck: &Deck, output: OutputOptions) -> Result<()> {
    let (path, rows) = deck.export_tasks()?;

    let mut human = HumanOutput::new("Tasks exported");
    human.push_summary("File", path.display().to_string());
    human.push_summary("Rows", rows.to_string());

    emit_success(output, "export", &ExportOutput { path, rows }, Some(&human))
}

pub fn run_platforms(deck: &Deck, output: OutputOptions) -> Result<()> {
    let platforms = deck.tokens().statuses();

    let mut human = HumanOutput::new("Platforms");
    for status in &platforms {
        human.push_summary(status.name.clone(), status.label);
    }

    emit_success(output, "platforms", &PlatformsOutput { platforms }, Some(&human))
}
