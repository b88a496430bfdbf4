//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tidysheet",
    version,
    about = "Normalize loosely-structured spreadsheets into clean tables",
    long_about = "Normalize a loosely-structured spreadsheet (XLSX or CSV).\n\n\
                  Finds the real header row, cleans header names into stable\n\
                  identifiers, maps columns onto semantic roles (id, name,\n\
                  description, hourly_rate, available_from, available_to),\n\
                  coerces rates and dates, and writes cleaned XLSX/CSV files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize one spreadsheet and write cleaned outputs.
    Clean(CleanArgs),

    /// List the semantic roles and their default keyword sets.
    Roles,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the source spreadsheet (.xlsx or delimited text).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for cleaned files (default: next to the input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format to generate.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,

    /// Analyze and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// How many leading rows to scan for the header.
    #[arg(long = "scan-window", value_name = "ROWS", default_value_t = 10)]
    pub scan_window: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// XLSX workbook only.
    Xlsx,
    /// BOM-prefixed CSV only.
    Csv,
    /// Both outputs.
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
