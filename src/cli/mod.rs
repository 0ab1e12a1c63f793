//! Command-line interface for autodeck
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command family lives in its own submodule; running without a
//! subcommand opens the interactive console menu.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::deck::Deck;
use crate::error::Result;
use crate::output::OutputOptions;

mod init;
pub mod menu;
mod misc;
mod serve;
mod task;

/// autodeck - personal automation dashboard
///
/// Manage automation tasks, daily report notes and the activity log from a
/// console menu, scripted commands or a local web dashboard.
#[derive(Parser, Debug)]
#[command(name = "autodeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Home directory holding autodeck.toml, data/ and logs/ (defaults to current directory)
    #[arg(long, global = true, env = "AUTODECK_HOME")]
    pub home: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create directories, the task file and a default config
    Init,

    /// Append a note to today's report
    Note {
        /// Note text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Show the most recent activity log lines
    Logs {
        /// Number of lines (defaults to log.tail_lines from config)
        #[arg(short = 'n', long)]
        lines: Option<usize>,
    },

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Export tasks to data/tasks_export.csv
    Export,

    /// Show platform connection status
    Platforms,

    /// Run the web dashboard
    Serve {
        /// Address to bind (defaults to web.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (defaults to web.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Interactive console menu (default)
    Menu,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    New {
        /// Task name
        name: String,

        /// Target platform
        #[arg(long)]
        platform: Option<String>,

        /// How often the task runs
        #[arg(long)]
        frequency: Option<String>,
    },

    /// List tasks in stored order
    #[command(alias = "ls")]
    List,

    /// Activate or pause a task
    Toggle {
        /// 1-based position or task id
        selector: String,
    },

    /// Delete a task
    Rm {
        /// 1-based position or task id
        selector: String,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let home = match self.home {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        let deck = Deck::open(home);
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Init => init::run(&deck, output),
            Commands::Note { text } => misc::run_note(&deck, &text.join(" "), output),
            Commands::Logs { lines } => misc::run_logs(&deck, lines, output),
            Commands::Task(cmd) => match cmd {
                TaskCommands::New {
                    name,
                    platform,
                    frequency,
                } => task::run_new(
                    &deck,
                    task::NewOptions {
                        name,
                        platform,
                        frequency,
                    },
                    output,
                ),
                TaskCommands::List => task::run_list(&deck, output),
                TaskCommands::Toggle { selector } => task::run_toggle(&deck, &selector, output),
                TaskCommands::Rm { selector } => task::run_rm(&deck, &selector, output),
            },
            Commands::Export => misc::run_export(&deck, output),
            Commands::Platforms => misc::run_platforms(&deck, output),
            Commands::Serve { host, port } => serve::run(deck, host, port, output),
            Commands::Menu => menu::run_stdio(deck),
        }
    }
}
