//! Interactive console menu.
//!
//! Numbered options read from any `BufRead`; validation failures are printed
//! as warnings and the menu is shown again. End of input behaves like `0`.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::cli::serve::DashboardHandle;
use crate::cli::task::task_lines;
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::task::{NewTask, TaskQuery};

const MENU: &str = "\
==== autodeck ====
1. Add note to today's report
2. Show recent activity
3. Create task
4. List tasks
5. Activate/pause task
6. Delete task
7. Export tasks to CSV
8. Open web panel
0. Exit";

pub struct Menu<R, W> {
    deck: Deck,
    input: R,
    out: W,
}

/// Run the menu on stdin/stdout
pub fn run_stdio(deck: Deck) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(deck, stdin.lock(), stdout.lock()).run()
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(deck: Deck, input: R, out: W) -> Self {
        Self { deck, input, out }
    }

    pub fn run(mut self) -> Result<()> {
        self.deck.log_event("Console started");

        loop {
            writeln!(self.out, "\n{MENU}")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.add_note(),
                "2" => self.show_logs(),
                "3" => self.create_task(),
                "4" => self.list_tasks().map(|_| ()),
                "5" => self.toggle_task(),
                "6" => self.delete_task(),
                "7" => self.export_tasks(),
                "8" => self.open_web_panel(),
                "0" => break,
                other => {
                    writeln!(self.out, "warning: unknown option '{other}'")?;
                    Ok(())
                }
            };

            if let Err(err) = outcome {
                if matches!(err, Error::Io(_)) {
                    return Err(err);
                }
                let level = if err.is_user_error() { "warning" } else { "error" };
                writeln!(self.out, "{level}: {err}")?;
            }
        }

        self.deck.log_event("Console closed");
        writeln!(self.out, "Bye.")?;
        Ok(())
    }

    fn add_note(&mut self) -> Result<()> {
        let text = self.prompt("Note: ")?.unwrap_or_default();
        let path = self.deck.add_note(&text)?;
        writeln!(self.out, "Note saved to {}", path.display())?;
        Ok(())
    }

    fn show_logs(&mut self) -> Result<()> {
        let lines = self.deck.recent_logs(self.deck.config().log.tail_lines)?;
        if lines.is_empty() {
            writeln!(self.out, "No activity yet.")?;
        }
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn create_task(&mut self) -> Result<()> {
        let name = self.prompt("Task name: ")?.unwrap_or_default();
        let platform = self.prompt("Platform: ")?;
        let frequency = self.prompt("Frequency: ")?;

        let task = self
            .deck
            .create_task(NewTask::new(name, platform, frequency))?;
        writeln!(
            self.out,
            "Created {} [{}] ({})",
            task.name, task.platform, task.frequency
        )?;
        Ok(())
    }

    fn list_tasks(&mut self) -> Result<bool> {
        let tasks = self.deck.tasks()?;
        if tasks.is_empty() {
            writeln!(self.out, "No tasks yet.")?;
            return Ok(false);
        }
        for line in task_lines(&tasks) {
            writeln!(self.out, "{line}")?;
        }
        Ok(true)
    }

    fn toggle_task(&mut self) -> Result<()> {
        let Some(query) = self.select_task()? else {
            return Ok(());
        };
        let task = self.deck.toggle_task(&query)?;
        writeln!(self.out, "{} is now {}", task.name, task.status_label())?;
        Ok(())
    }

    fn delete_task(&mut self) -> Result<()> {
        let Some(query) = self.select_task()? else {
            return Ok(());
        };
        let task = self.deck.delete_task(&query)?;
        writeln!(self.out, "Deleted {}", task.name)?;
        Ok(())
    }

    fn export_tasks(&mut self) -> Result<()> {
        let (path, rows) = self.deck.export_tasks()?;
        writeln!(self.out, "Exported {rows} task(s) to {}", path.display())?;
        Ok(())
    }

    fn open_web_panel(&mut self) -> Result<()> {
        let web = &self.deck.config().web;
        let (host, port) = (web.host.clone(), web.port);
        let panel = DashboardHandle::start(Arc::new(self.deck.clone()), &host, port)?;
        writeln!(
            self.out,
            "Dashboard at http://{} (press Enter to return to the menu)",
            panel.addr()
        )?;
        self.out.flush()?;

        // end of input also closes the panel
        let mut line = String::new();
        let read = self.input.read_line(&mut line);
        let addr = panel.stop()?;
        read?;
        writeln!(self.out, "Dashboard at {addr} stopped")?;
        Ok(())
    }

    /// List tasks and ask for a selector; None when there is nothing to pick
    fn select_task(&mut self) -> Result<Option<TaskQuery>> {
        if !self.list_tasks()? {
            return Ok(None);
        }
        let raw = self.prompt("Task number or id: ")?.unwrap_or_default();
        TaskQuery::parse(&raw).map(Some)
    }

    /// Print a prompt and read one trimmed line; None at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
