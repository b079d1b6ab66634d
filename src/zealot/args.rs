use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zealot", version = env!("ZEALOT_VERSION"))]
#[command(about = "Notes and folders, kept in a local store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $ZEALOT_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes
    #[command(alias = "ls")]
    List {
        /// Only notes in this folder (id or prefix)
        #[arg(short, long, conflicts_with = "unfiled")]
        folder: Option<String>,

        /// Only notes outside any folder
        #[arg(short, long)]
        unfiled: bool,
    },

    /// Show a note in full
    #[command(alias = "v")]
    View {
        /// Note id or unique prefix
        id: String,
    },

    /// Create a note
    #[command(alias = "n")]
    New {
        /// Folder to create the note in (id or prefix)
        #[arg(short, long)]
        folder: Option<String>,

        /// Title of the note
        #[arg(short = 'T', long, default_value = "")]
        title: String,

        /// Body of the note
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Change a note's title or content
    #[command(alias = "e")]
    Edit {
        /// Note id or unique prefix
        id: String,

        /// New title (unchanged if omitted)
        #[arg(short = 'T', long)]
        title: Option<String>,

        /// New content (unchanged if omitted)
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note id or unique prefix
        id: String,
    },

    /// Move a note into a folder, or to unfiled without --folder
    #[command(alias = "mv")]
    Move {
        /// Note id or unique prefix
        id: String,

        /// Destination folder (id or prefix)
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// List folders with note counts
    Folders,

    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., preview-length)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderAction {
    /// Create a folder
    Create { name: String },

    /// Rename a folder
    Rename {
        /// Folder id or unique prefix
        id: String,
        name: String,
    },

    /// Delete a folder; its notes move to unfiled
    #[command(alias = "rm")]
    Delete {
        /// Folder id or unique prefix
        id: String,
    },
}
