//! Definition of the command line app.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use oncomap_regions::Period;

/// Regional cancer mortality statistics.
///
/// Loads a table of values by region and year, maps region names onto canonical regions, and
/// prints the derived figures as JSON on stdout. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "oncomap", version, max_term_width = 79)]
#[command(disable_help_subcommand = true, subcommand_required = true)]
pub struct Cli {
    /// The path to the config folder.
    #[arg(long, short, global = true, value_name = "CONFIG", env = "ONCOMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The log level of oncomap.
    #[arg(long, global = true, value_name = "LEVEL", env = "ONCOMAP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// The log format: auto, pretty, simplified or json.
    #[arg(long, global = true, value_name = "FORMAT", env = "ONCOMAP_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// The layout of input tables: wide or long.
    #[arg(long, global = true, value_name = "FORMAT")]
    pub table_format: Option<String>,

    /// What the values count, used in insights.
    #[arg(long, global = true)]
    pub measure: Option<String>,

    /// The area all regions make up, used in insights.
    #[arg(long, global = true)]
    pub scope: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Map region names of a period onto canonical regions.
    Normalize(PeriodArgs),
    /// Sum a period per zone.
    Zones(PeriodArgs),
    /// Summary statistics of a period.
    Stats(PeriodArgs),
    /// Totals and year-over-year change of all periods.
    Trend(DatasetArgs),
    /// Regions with the highest values of a period.
    Top(TopArgs),
    /// Values of selected regions across periods.
    Compare(CompareArgs),
    /// Key facts of a period as Markdown.
    Insights(InsightsArgs),
    /// Mortality and survival rates from an incidence and a mortality table.
    Rates(RatesArgs),
    /// Print the effective region tables as YAML.
    Tables,
    /// Validate the region tables.
    ///
    /// Fails if a region is assigned to more than one zone.
    Check,
}

#[derive(Debug, Args)]
pub struct DatasetArgs {
    /// The CSV file to load.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct PeriodArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// The year to evaluate. Defaults to the latest year of the table.
    #[arg(long, short)]
    pub period: Option<Period>,
}

#[derive(Debug, Args)]
pub struct TopArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// The number of regions to list.
    #[arg(long, short = 'n', default_value_t = 10)]
    pub count: usize,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// A region to compare. Can be repeated.
    #[arg(long = "region", short, required = true)]
    pub regions: Vec<String>,

    /// A year to include. Can be repeated. Defaults to all years of the table.
    #[arg(long = "period", short)]
    pub periods: Vec<Period>,
}

#[derive(Debug, Args)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Print one insight per line instead of JSON.
    #[arg(long)]
    pub markdown: bool,
}

#[derive(Debug, Args)]
pub struct RatesArgs {
    /// The CSV file with incident cases.
    #[arg(value_name = "INCIDENCE")]
    pub incidence: PathBuf,

    /// The CSV file with deaths.
    #[arg(value_name = "MORTALITY")]
    pub mortality: PathBuf,

    /// The year to evaluate. Defaults to the latest year of the mortality table.
    #[arg(long, short)]
    pub period: Option<Period>,
}
