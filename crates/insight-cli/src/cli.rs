//! CLI argument definitions for the `insight` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use insight_stream::Frequency;

#[derive(Parser)]
#[command(
    name = "insight",
    version,
    about = "Adaptive analytics for tabular datasets",
    long_about = "Load a CSV or JSON dataset with an unknown schema, bind its columns to\n\
                  business roles (revenue, profit, region, ...), and compute dashboard\n\
                  KPIs, time series, breakdowns, and a paginated ledger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow record values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize a source file the way an upload would.
    Inspect(SourceArgs),

    /// Compute the dashboard for a dataset.
    Report(ReportArgs),

    /// Show which column each role was bound to.
    Roles(SourceArgs),

    /// Fetch service-side aggregates for a dataset.
    Remote(RemoteArgs),

    /// Ask the chat service a question and stream the reply.
    Chat(ChatArgs),

    /// Check that the analysis service is reachable.
    Health(HealthArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// CSV, JSON, or text file.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ReportArgs {
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Case-insensitive text matched against every value of a record.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact-match filter on a role's column, e.g. `region=East`. Repeatable.
    #[arg(long = "filter", value_name = "ROLE=VALUE")]
    pub filters: Vec<String>,

    /// 1-based ledger page.
    #[arg(long = "page", default_value_t = 1)]
    pub page: usize,

    /// Override the configured page size.
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Print the full report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct RemoteArgs {
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Bucket width requested from the service.
    #[arg(long = "frequency", default_value = "Monthly")]
    pub frequency: Frequency,

    /// Merge the service's column mapping into the local binding and report
    /// with it.
    #[arg(long = "apply-hints")]
    pub apply_hints: bool,

    /// Override the configured service endpoint.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Question to send.
    #[arg(value_name = "MESSAGE", required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// Conversation to continue.
    #[arg(long = "chat-id", value_name = "ID")]
    pub chat_id: Option<String>,

    /// Override the configured service endpoint.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,
}

#[derive(Args)]
pub struct HealthArgs {
    /// Override the configured service endpoint.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,
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
