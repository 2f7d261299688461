//! CLI argument definitions for the compensation pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use comp_payband::BlockDetection;

#[derive(Parser)]
#[command(
    name = "comp-pipeline",
    version,
    about = "HR compensation analytics pipeline",
    long_about = "Batch pipeline over an HR workbook export: payband table\n\
                  reconstruction, geo factor resolution, candidate cleaning and\n\
                  enrichment, active employee compensation, and historical\n\
                  headcount."
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
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level compensation values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract the payband table, geo factors, and raw candidate data.
    Extract(WorkbookArgs),

    /// Clean and enrich candidate records (requires the payband artifact).
    Clean(WorkbookArgs),

    /// Calculate geo-adjusted compensation for active employees.
    Active(WorkbookArgs),

    /// Rebuild the historical monthly headcount.
    Headcount(WorkbookArgs),

    /// Run every stage in dependency order.
    Run(WorkbookArgs),
}

#[derive(Parser)]
pub struct WorkbookArgs {
    /// Directory holding the workbook's per-sheet CSV exports.
    #[arg(value_name = "WORKBOOK_DIR")]
    pub workbook_dir: PathBuf,

    /// Output directory for artifacts (default: <WORKBOOK_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Payband block detection strategy.
    #[arg(long = "detection", value_enum, default_value = "header-anchor")]
    pub detection: BlockDetectionArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BlockDetectionArg {
    HeaderAnchor,
    TriadScan,
}

impl From<BlockDetectionArg> for BlockDetection {
    fn from(arg: BlockDetectionArg) -> Self {
        match arg {
            BlockDetectionArg::HeaderAnchor => BlockDetection::HeaderAnchor,
            BlockDetectionArg::TriadScan => BlockDetection::TriadScan,
        }
    }
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
