//! CLI parse: clap types for dirtrail. No behavior; definitions only.

use crate::differ::DifferBackend;
use crate::render::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// dirtrail - consolidated structural diff across directory snapshots
#[derive(Parser, Debug)]
#[command(name = "dirtrail")]
#[command(about = "Show how a file tree evolved across an ordered list of directory snapshots")]
pub struct Cli {
    /// Snapshot directories, oldest first
    #[arg(required_unless_present = "print_config")]
    pub directories: Vec<PathBuf>,

    /// Do not attribute the first snapshot's files as creations
    #[arg(long)]
    pub no_empty_start: bool,

    /// Group rows into one section per top-level folder
    #[arg(long)]
    pub group_by_folder: bool,

    /// Output format (html, table, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Write the rendered output to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Differ back-end (git, walk)
    #[arg(long)]
    pub differ: Option<DifferBackend>,

    /// Diff independent snapshot pairs concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    /// Disable colored terminal tables
    #[arg(long)]
    pub no_color: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log file path (switches log output to the file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
