//! CLI argument definitions for the `epi` loader.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use epi_ingest::SeriesLayout;
use epi_model::Metric;
use epi_store::DEFAULT_BATCH_SIZE;

#[derive(Parser)]
#[command(
    name = "epi",
    version,
    about = "Load daily case/death time series into a country/day fact store",
    long_about = "Load daily case/death time series into a country/day fact store.\n\n\
                  Reads the wide confirmed-cases and deaths exports, sums rows that share\n\
                  a country, and upserts one fact per (country, date) in a single transaction."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
    /// Parse both time-series files and upsert the merged facts.
    Ingest(IngestArgs),

    /// Read aggregates back from the store.
    Query(QueryArgs),
}

/// Store connection flags shared by every command.
///
/// All three are required; they are optional here so that a missing value
/// is reported as a configuration error instead of a usage error.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Store connection string (`sqlite://<path>`, `file:<uri>`, `sqlite::memory:` or a path).
    #[arg(long = "db", alias = "jdbc", value_name = "URL", global = true)]
    pub db: Option<String>,

    /// Store user.
    #[arg(long = "user", value_name = "USER", global = true)]
    pub user: Option<String>,

    /// Store credential.
    #[arg(long = "pass", value_name = "SECRET", global = true)]
    pub pass: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// Wide time-series file of cumulative confirmed cases.
    #[arg(long = "confirmed", value_name = "PATH")]
    pub confirmed: Option<PathBuf>,

    /// Wide time-series file of cumulative deaths.
    #[arg(long = "deaths", value_name = "PATH")]
    pub deaths: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Zero-based column holding the country label.
    #[arg(long = "label-column", default_value_t = SeriesLayout::DEFAULT_LABEL_COLUMN)]
    pub label_column: usize,

    /// Zero-based column of the first reporting date.
    #[arg(long = "first-date-column", default_value_t = SeriesLayout::DEFAULT_FIRST_DATE_COLUMN)]
    pub first_date_column: usize,

    /// Rows between two progress events while upserting.
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Print the run report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub query: QueryCommand,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Print results as JSON instead of a table.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
    /// Most recent date present in the store.
    Latest,

    /// Worldwide totals for a date (default: latest).
    Global {
        /// Date as YYYY-MM-DD.
        #[arg(long = "date")]
        date: Option<String>,
    },

    /// One country's series over a date range.
    Country {
        /// Exact country name as stored.
        name: String,

        /// First date (YYYY-MM-DD), default: first stored date.
        #[arg(long = "start")]
        start: Option<String>,

        /// Last date (YYYY-MM-DD), default: last stored date.
        #[arg(long = "end")]
        end: Option<String>,
    },

    /// Every country present in the store.
    Countries,

    /// Every country's values on the latest date.
    LatestAll,

    /// Countries ranked by a metric on the latest date.
    Top {
        /// Metric to rank by.
        #[arg(long = "metric", value_enum, default_value = "cases")]
        metric: MetricArg,

        /// Number of countries to show.
        #[arg(long = "limit", default_value_t = 10)]
        limit: usize,
    },
}

/// CLI metric choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MetricArg {
    Cases,
    Deaths,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Cases => Metric::Cases,
            MetricArg::Deaths => Metric::Deaths,
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
