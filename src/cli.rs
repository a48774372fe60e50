use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Config file, defaults to the platform config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Keep favorites in memory only for this run
    #[arg(long, global = true)]
    pub ephemeral: bool,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Looks up a GitHub user and adds them to favorites
    Add {
        /// GitHub username
        username: String,
    },
    /// Removes a user from favorites
    Delete {
        /// Login of the favorite to remove
        login: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Displays every stored field of one favorite
    Show {
        /// Login of the favorite to show
        login: String,
    },
    /// Displays all favorites as a table
    List,
}
