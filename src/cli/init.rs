//! autodeck init command implementation
//!
//! Creates the config file, data and log directories and an empty task file
//! in the home directory.

use crate::deck::Deck;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub fn run(deck: &Deck, output: OutputOptions) -> Result<()> {
    let report = deck.init()?;

    let mut created_items = Vec::new();
    if report.config {
        created_items.push("autodeck.toml");
    }
    if report.data_dir {
        created_items.push("data/ logs/");
    }
    if report.tasks_file {
        created_items.push("tasks.json");
    }

    let header = if created_items.is_empty() {
        "autodeck init: nothing to do".to_string()
    } else {
        "autodeck init: initialized home".to_string()
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("home", report.home.display().to_string());
    human.push_summary(
        "created",
        if created_items.is_empty() {
            "none".to_string()
        } else {
            created_items.join(", ")
        },
    );
    human.push_next_step("autodeck task new <name> --platform <platform>");
    human.push_next_step("autodeck serve");

    emit_success(output, "init", &report, Some(&human))
}
