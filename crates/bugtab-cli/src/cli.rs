//! CLI argument definitions for the bugtab export processor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bugtab_ingest::ExportOptions;

#[derive(Parser)]
#[command(
    name = "bugtab",
    version,
    about = "Parse bug-tracker CSV exports into processed data tables",
    long_about = "Parse bug-tracker CSV exports into processed data tables.\n\n\
                  Reassembles multi-line records, tokenizes mixed CSV/JSON quoting,\n\
                  and reduces raw exports to a resolved-issue dataset."
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
    /// Parse an export, reduce it to resolved issues, write the processed table.
    Process(ProcessArgs),

    /// List an export's column names and indices.
    Headers(ExportArgs),

    /// Frequency-rank the distinct values of categorical columns.
    Encode(EncodeArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the export file.
    #[arg(value_name = "EXPORT_FILE")]
    pub export_file: PathBuf,

    /// Treat the first line as data rather than a header.
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Trailing substring marking the end of a logical record.
    #[arg(long = "sentinel", value_name = "TEXT", default_value = ",---")]
    pub sentinel: String,
}

impl ExportArgs {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            has_header: !self.no_header,
            sentinel: self.sentinel.clone(),
        }
    }
}

#[derive(Parser)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Output path for the processed table (default: <EXPORT_FILE stem>-processed.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Column to encode; repeat for multiple columns.
    #[arg(long = "column", value_name = "NAME", required = true)]
    pub columns: Vec<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
