//! autodeck task command implementations.

use serde::Serialize;

use crate::deck::Deck;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{NewTask, Task, TaskQuery};

pub struct NewOptions {
    pub name: String,
    pub platform: Option<String>,
    pub frequency: Option<String>,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    active: usize,
    tasks: Vec<Task>,
}

pub fn run_new(deck: &Deck, options: NewOptions, output: OutputOptions) -> Result<()> {
    let task = deck.create_task(NewTask::new(
        options.name,
        options.platform,
        options.frequency,
    ))?;

    let mut human = HumanOutput::new("Task created");
    push_task_summary(&mut human, &task);
    human.push_next_step("autodeck task list");

    emit_success(output, "task new", &task, Some(&human))
}

pub fn run_list(deck: &Deck, output: OutputOptions) -> Result<()> {
    let tasks = deck.tasks()?;
    let active = tasks.iter().filter(|task| task.active).count();

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    human.push_summary("Active", active.to_string());
    for line in task_lines(&tasks) {
        human.push_detail(line);
    }
    if tasks.is_empty() {
        human.push_next_step("autodeck task new <name>");
    }

    let data = TaskListOutput {
        total: tasks.len(),
        active,
        tasks,
    };
    emit_success(output, "task list", &data, Some(&human))
}

pub fn run_toggle(deck: &Deck, selector: &str, output: OutputOptions) -> Result<()> {
    let query = TaskQuery::parse(selector)?;
    let task = deck.toggle_task(&query)?;

    let header = if task.active {
        "Task activated"
    } else {
        "Task paused"
    };
    let mut human = HumanOutput::new(header);
    push_task_summary(&mut human, &task);

    emit_success(output, "task toggle", &task, Some(&human))
}

pub fn run_rm(deck: &Deck, selector: &str, output: OutputOptions) -> Result<()> {
    let query = TaskQuery::parse(selector)?;
    let task = deck.delete_task(&query)?;

    let mut human = HumanOutput::new("Task deleted");
    push_task_summary(&mut human, &task);

    emit_success(output, "task rm", &task, Some(&human))
}

/// One numbered line per task, as shown by `task list` and the console menu
pub fn task_lines(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            format!(
                "{}. [{}] {} | {} | {} ({})",
                idx + 1,
                task.status_label(),
                task.name,
                task.platform,
                task.frequency,
                task.id
            )
        })
        .collect()
}

fn push_task_summary(human: &mut HumanOutput, task: &Task) {
    human.push_summary("ID", task.id.clone());
    human.push_summary("Name", task.name.clone());
    human.push_summary("Platform", task.platform.clone());
    human.push_summary("Frequency", task.frequency.clone());
    human.push_summary("State", task.status_label());
}
