//! CLI argument parsing for qu
//!
//! Supports global flags: --store, --format, --quiet, --verbose

pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// qu - one file per idea, the filename is the record
#[derive(Parser, Debug)]
#[command(name = "qu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Store root (default: $QU_DIR, then ~/.qu)
    #[arg(long, global = true, env = "QU_DIR")]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter level or directive (e.g. `trace`, `qu_core=debug`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the store layout (safe to repeat)
    Init,

    /// Create a text idea
    New {
        /// Clumped tags, e.g. `work,app=journal`
        tags: String,

        /// Content; opens the editor when omitted
        #[arg(long, short)]
        content: Option<String>,
    },

    /// Import a file (image, audio, text) as a new idea
    Add {
        /// Clumped tags; `FILENAME` becomes the file's stem
        tags: String,

        /// File to copy into the store
        file: PathBuf,
    },

    /// Edit ideas: one directly, several side by side
    Open {
        /// Id, `last[N]`, id range `a-b`, or tag query
        selector: String,

        /// Use the side-by-side view even for a single idea
        #[arg(long)]
        force_split: bool,
    },

    /// Print idea content
    Cat {
        /// Id, `last[N]`, id range `a-b`, or tag query
        selector: String,
    },

    /// List idea filenames
    Ls {
        /// Id, `last[N]`, id range `a-b`, or tag query (default: all alive)
        selector: Option<String>,
    },

    /// List every tag in the store
    Tags,

    /// List tags that appear alongside a query
    Lst {
        /// Tag query
        query: String,
    },

    /// Write a new idea derived from an alive one, consuming it
    Consume {
        /// Idea to consume
        id: String,

        /// Content of the new idea; opens the editor when omitted
        #[arg(long, short)]
        content: Option<String>,
    },

    /// Record that one existing idea consumed another
    Consumes {
        /// Idea being consumed
        consumed: String,

        /// Idea that consumes it
        consumer: String,
    },

    /// Move an idea to the zombie state
    Zombie { id: String },

    /// Return a consumed idea to the alive state
    Unconsume { id: String },

    /// Print the content of an idea's direct parents
    Lineage { id: String },

    /// Remove ideas (to trash unless configured otherwise)
    Rm {
        /// Id, `last[N]` or id range `a-b`
        selector: String,
    },

    /// Duplicate an idea under a new id
    Cp { id: String },

    /// Add a tag to ideas; a tag query adds it to ideas matching any term
    AddTag {
        /// Id, `last[N]`, id range `a-b`, or tag query
        selector: String,
        tag: String,
    },

    /// Remove a tag from one idea
    KillTag { id: String, tag: String },

    /// Rename a tag on every idea
    RenameTag { from: String, to: String },

    /// Remove a tag from every idea
    DestroyTag { tag: String },

    /// Mark a text idea as encrypted
    Encrypt { id: String },

    /// Print or extend content published to an application
    App {
        name: String,

        /// Append this line instead of printing
        #[arg(long)]
        append: Option<String>,
    },

    /// Store statistics
    Stats,

    /// Save the working-set scratch files back onto their ideas
    SaveWorking,
}
