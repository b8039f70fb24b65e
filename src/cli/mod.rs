//! CLI argument parsing for dirtycop.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Dirtycop: scope lint findings to the lines changed since a git reference.
///
/// Changed files and lines are computed once per run from `git diff`. The
/// result selects which files a lint engine inspects and which of its
/// findings are worth reporting.
#[derive(Parser, Debug)]
#[command(name = "dirtycop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of `.dirtycop.yml` at the repository root.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Git reference to compare against (overrides the configured reference).
    #[arg(short, long, global = true, value_name = "REF")]
    pub reference: Option<String>,

    /// Run as if started in DIR.
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for dirtycop.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the files to lint, one per line.
    ///
    /// Explicit FILES are printed unchanged. Otherwise prints the changed
    /// files that also appear in the discovered list.
    Files(FilesArgs),

    /// Print the changed line numbers of one file.
    Lines(LinesArgs),

    /// Print every changed file and its changed lines as JSON.
    Changes,

    /// Drop offenses outside changed lines from a lint report.
    ///
    /// Prints the filtered report as JSON. Exits with status 2 when any
    /// offense remains.
    Filter(FilterArgs),
}

/// Arguments for the `files` command.
#[derive(Parser, Debug)]
pub struct FilesArgs {
    /// Files named explicitly on the lint engine's command line.
    pub files: Vec<PathBuf>,

    /// File listing the engine's discovered targets, one per line ('-' for stdin).
    ///
    /// Without it, every changed file not matching `exclude` is eligible.
    #[arg(long, value_name = "PATH")]
    pub discovered: Option<String>,
}

/// Arguments for the `lines` command.
#[derive(Parser, Debug)]
pub struct LinesArgs {
    /// File to inspect, relative to the working directory or absolute.
    pub file: PathBuf,
}

/// Arguments for the `filter` command.
#[derive(Parser, Debug)]
pub struct FilterArgs {
    /// Report to filter ('-' for stdin).
    #[arg(short, long, default_value = "-", value_name = "PATH")]
    pub input: String,

    /// Report format (offenses, rubocop).
    #[arg(short, long, default_value = "offenses")]
    pub format: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
