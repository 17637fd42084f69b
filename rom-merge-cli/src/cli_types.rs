//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rom-merge")]
#[command(
    about = "Merge ROM collections into one best version per game",
    long_about = None
)]
pub(crate) struct Cli {
    /// Settings file (defaults to ~/.config/rom-merge/settings.toml)
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

/// Location of the catalog database.
#[derive(Args, Clone)]
pub(crate) struct DbArgs {
    /// Catalog database (defaults to paths.database in settings)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Location of the merged collection.
#[derive(Args, Clone)]
pub(crate) struct TargetArgs {
    /// Export directory (defaults to paths.target_dir in settings)
    #[arg(short, long)]
    pub target: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan ROM collections and rebuild the catalog database
    Import {
        /// Root directory with one folder per collection
        #[arg(long)]
        src: Option<PathBuf>,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Show the version chosen for every game
    Plan {
        #[command(flatten)]
        db: DbArgs,

        /// Print the export plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a script that builds the merged collection
    Generate {
        #[command(flatten)]
        db: DbArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Script path (defaults to paths.script in settings)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit a Windows batch file instead of a bash script
        #[arg(long)]
        batch: bool,
    },

    /// Build the merged collection directly
    Merge {
        #[command(flatten)]
        db: DbArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Show what would be copied without touching the target
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Check the catalog, the stored ranking and the export target
    Verify {
        #[command(flatten)]
        db: DbArgs,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show catalog database statistics
    Stats {
        #[command(flatten)]
        db: DbArgs,
    },

    /// Delete the catalog database
    Reset {
        #[command(flatten)]
        db: DbArgs,

        /// Required to actually delete
        #[arg(long)]
        confirm: bool,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective settings as TOML
    Show,

    /// Print the settings file path
    Path,
}
