use clap::{Args, Parser, Subcommand};
use drafthubapp::model::DraftId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "drafthub",
    bin_name = "drafthub",
    version,
    disable_help_subcommand = true
)]
#[command(
    about = "Draft short posts and publish them in bulk to a GitHub repository",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding drafts.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file to read and edit
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, help_heading = "Options")]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List drafts (default)
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Add a draft
    #[command(display_order = 2)]
    Add { title: String, body: String },

    /// Replace the title and body of a draft
    #[command(display_order = 3)]
    Edit {
        id: DraftId,
        title: String,
        body: String,
    },

    /// Delete a draft
    #[command(alias = "rm", display_order = 4)]
    Delete { id: DraftId },

    /// Publish every draft as a Markdown file, then clear the list
    #[command(display_order = 10)]
    Publish {
        #[command(flatten)]
        repo: RepoArgs,

        /// GitHub token with contents write access
        #[arg(long)]
        token: Option<String>,
    },

    /// Fetch a Markdown file from GitHub and render it
    #[command(display_order = 11)]
    Show {
        #[command(flatten)]
        repo: RepoArgs,

        /// Path inside the repository (defaults to source_path)
        path: Option<String>,
    },

    /// Show or edit settings
    #[command(display_order = 20)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RepoArgs {
    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print one setting
    Get { key: String },
    /// Save a setting to the config file
    Set { key: String, value: String },
    /// Remove a setting from the config file
    Unset { key: String },
}
