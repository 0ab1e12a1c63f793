//! CSV export of the task collection.

use std::path::Path;

use crate::error::{Error, Result};
use crate::lock;
use crate::task::Task;

pub const CSV_HEADER: &str = "id,name,platform,frequency,active,created_at";

/// Render tasks as CSV text (header plus one row per task)
pub fn render_csv(tasks: &[Task]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for task in tasks {
        out.push_str(&csv_escape(&task.id));
        out.push(',');
        out.push_str(&csv_escape(&task.name));
        out.push(',');
        out.push_str(&csv_escape(&task.platform));
        out.push(',');
        out.push_str(&csv_escape(&task.frequency));
        out.push(',');
        out.push_str(if task.active { "1" } else { "0" });
        out.push(',');
        out.push_str(&csv_escape(&task.created_at));
        out.push('\n');
    }
    out
}

/// Write the CSV export; an empty collection is rejected
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize> {
    if tasks.is_empty() {
        return Err(Error::InvalidArgument("no tasks to export".to_string()));
    }
    lock::write_atomic(path, render_csv(tasks).as_bytes())?;
    Ok(tasks.len())
}

fn csv_escape(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task(name: &str, active: bool) -> Task {
        Task {
            id: "T1".to_string(),
            name: name.to_string(),
            platform: "TikTok".to_string(),
            frequency: "Daily".to_string(),
            active,
            created_at: "2024-01-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn render_quotes_fields() {
        let csv = render_csv(&[task("Clip \"best\", daily", false)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "\"T1\",\"Clip \"\"best\"\", daily\",\"TikTok\",\"Daily\",0,\"2024-01-01 10:00:00\""
        );
    }

    #[test]
    fn export_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data").join("tasks_export.csv");
        let count = export_csv(&[task("a", true), task("b", true)], &path).unwrap();
        assert_eq!(count, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.lines().nth(1).unwrap().contains(",1,"));
    }

    #[test]
    fn export_rejects_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        let err = export_csv(&[], &path).expect_err("empty");
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(!path.exists());
    }
}
