mod browse;
mod handlers;

use clap::{Parser, Subcommand};

use memo::models::{StatusFilter, Visibility};

pub use handlers::run;

#[derive(Parser, Debug)]
#[command(name = "memo")]
#[command(version, about = "Search, archive, restore, delete and send memos")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search your memos and print the matches
    List {
        /// Only show memos whose content contains this text
        #[arg(value_name = "TEXT", default_value = "")]
        text: String,

        /// Row status to list (all, normal, archived)
        #[arg(long, default_value = "normal")]
        status: StatusFilter,

        /// Maximum number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse memos interactively: type to search, `:help` for commands
    Browse {
        /// Initial search text
        #[arg(value_name = "TEXT", default_value = "")]
        text: String,

        /// Row status to start with (all, normal, archived)
        #[arg(long, default_value = "normal")]
        status: StatusFilter,

        /// Skip confirmation prompts
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Send a new memo
    Send {
        /// Memo content
        text: String,

        /// Memo visibility (private, protected, public)
        #[arg(long, default_value = "private")]
        visibility: Visibility,
    },

    /// Print the memo website URL
    Open,
}
