//! Command-line interface definitions for jardupe.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! The CLI follows standard conventions with global options (verbosity, color) and
//! a `check` subcommand that analyses one dependency manifest.
//!
//! # Example
//!
//! ```bash
//! # Check the dependencies listed in a manifest
//! jardupe check target/dependencies.json
//!
//! # Ignore every servlet API jar and print JSON
//! jardupe check target/dependencies.json --exclude 'javax.servlet:*' --output json
//!
//! # Only run when the manifest changed since the last successful check
//! jardupe check target/dependencies.json --stamp target/jardupe.stamp
//!
//! # Verbose mode for debugging
//! jardupe -v check target/dependencies.json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Detect classes shipped by more than one dependency jar.
///
/// jardupe scans the compile and runtime jars of a resolved dependency
/// graph and fails when the same class is present in several of them.
#[derive(Debug, Parser)]
#[command(name = "jardupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for jardupe.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a resolved dependency manifest for duplicate classes
    Check(CheckArgs),
}

/// Arguments for the check subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// JSON manifest of resolved dependencies
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Output format (text for build logs, json/csv for scripting)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Configuration file (defaults to ./jardupe.toml, then the user config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Artifacts to leave out: groupId:artifactId[:extension[:classifier]]
    ///
    /// Each segment may use `*` wildcards. Can be specified multiple times;
    /// patterns are added to those from the configuration file.
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Skip the analysis and report success
    #[arg(long)]
    pub skip: bool,

    /// Number of threads used to read jars
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Warn about unreadable jars instead of failing
    #[arg(long)]
    pub no_strict: bool,

    /// Stamp file recording the manifest digest of the last successful check
    ///
    /// When given, the check only runs if the manifest changed since then.
    #[arg(long, value_name = "PATH")]
    pub stamp: Option<PathBuf>,
}

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One warning per duplicated class
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
