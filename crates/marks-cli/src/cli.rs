//! CLI argument definitions for the mark notifier.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "marknotify",
    version,
    about = "Send students their marks from a grade sheet",
    long_about = "Load a semicolon-separated grade sheet, select which marks to\n\
                  announce, and build one notification per student.\n\n\
                  Selection runs from a JSON plan (or selects every mark when no\n\
                  plan is given); messages go to a dry-run printer by default or\n\
                  to a file outbox with --no-dry-run."
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
    /// Build and dispatch per-student mark notifications.
    Notify(NotifyArgs),

    /// List the topics found in a grade sheet.
    Topics(SheetArgs),

    /// List the students found in a grade sheet.
    Roster(SheetArgs),
}

#[derive(Parser)]
pub struct SheetArgs {
    /// Semicolon-separated grade sheet.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Alphabetically sort the students.
    #[arg(short = 's', long = "sort-students")]
    pub sort_students: bool,

    /// Alphabetically sort the topics.
    #[arg(short = 't', long = "sort-topics")]
    pub sort_topics: bool,
}

#[derive(Parser)]
pub struct NotifyArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Selection plan to replay (JSON array of steps).
    ///
    /// Without a plan every mark is selected.
    #[arg(long = "plan", value_name = "PATH")]
    pub plan: Option<PathBuf>,

    /// Directory for outgoing messages when not in dry-run mode.
    #[arg(long = "outbox", value_name = "DIR", default_value = "outbox")]
    pub outbox: PathBuf,

    /// Write messages to the outbox instead of printing them.
    ///
    /// Dry run is the default: bodies are built and printed, nothing is
    /// stored or transmitted.
    #[arg(long = "no-dry-run")]
    pub no_dry_run: bool,

    /// Sign the messages with this name.
    #[arg(long = "signature", value_name = "NAME")]
    pub signature: Option<String>,
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
