//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "medcare")]
#[command(about = "Reconcile and normalize the MedCare product catalog", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/medcare/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for commands that rewrite a single snapshot in place.
#[derive(Args, Clone)]
pub(crate) struct FileArgs {
    /// Snapshot to process (defaults to paths.current from settings)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Show what would change without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Merge curated data from earlier snapshots into the current one
    Reconcile {
        /// Freshly generated snapshot (defaults to paths.current from settings)
        #[arg(long)]
        current: Option<PathBuf>,

        /// Earlier snapshots, most recent first; missing files are ignored
        #[arg(long)]
        previous: Vec<PathBuf>,

        /// Additional snapshots to merge from; unreadable files are skipped
        #[arg(long, num_args = 1..)]
        extra: Vec<PathBuf>,

        /// Write the result here instead of replacing the current snapshot
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report matches without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Fill blank detail rows with values inferred from names and pack sizes
    Autofill {
        #[command(flatten)]
        file: FileArgs,
    },

    /// Rewrite detail rows into the canonical label order
    Normalize {
        #[command(flatten)]
        file: FileArgs,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}
