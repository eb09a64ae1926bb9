use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use thermo::cli::{self, ReportOptions};
use thermo::error::{ThermoError, ThermoResult};
use thermo::sheet::column_index;
use thermo::types::{DaysConfig, Metric};

#[derive(Parser)]
#[command(name = "thermo")]
#[command(about = "Sales & gross-profit thermometer reports from Excel workbooks")]
#[command(long_about = "Thermo - Daily sales & gross-profit thermometer reports

Reads a two-tab Excel workbook (daily figures + monthly goals), reshapes it
into a tidy per-day, per-company table, and renders progress gauges against
each company's 105% monthly goal.

WORKBOOK LAYOUT:
  Tab 1 (daily data): row 1 title, row 2 company names starting at column AA,
  row 3 Sales/GP sub-headers, rows 4+ one row per day, optionally ended by a
  \"Total\" row.
  Tab 2 (goals): one row per company with \"Company\", \"105% Sales\" and
  \"105% GP\" columns.

COMMANDS:
  report    - Render per-company thermometer gauges in the terminal
  summary   - Workbook-wide totals, goal and days elapsed
  export    - Write the tidy table (+ pacing) to .xlsx or .json
  watch     - Re-render the report whenever the workbook changes

EXAMPLES:
  thermo report october.xlsx
  thermo report october.xlsx --metric sales --total-days 20
  thermo report october.xlsx --days \"Acme=19\" --days \"Beta=22\"
  thermo export october.xlsx tidy.json
  thermo watch october.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Metric section selection for the report commands
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MetricArg {
    /// Sales thermometers only
    Sales,
    /// Gross-profit thermometers only
    Gp,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Sales => Metric::Sales,
            MetricArg::Gp => Metric::GrossProfit,
        }
    }
}

/// Parse a "Company=N" per-company total-days override
fn parse_days_override(s: &str) -> Result<(String, u32), String> {
    let (company, days) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COMPANY=N, got '{s}'"))?;
    let company = company.trim();
    if company.is_empty() {
        return Err(format!("expected COMPANY=N, got '{s}'"));
    }
    let days: u32 = days
        .trim()
        .parse()
        .map_err(|_| format!("'{days}' is not a day count"))?;
    if !(1..=31).contains(&days) {
        return Err(format!("day count must be in 1..=31, got {days}"));
    }
    Ok((company.to_string(), days))
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Render per-company thermometer gauges.

One gauge per company and metric: red fill for prior days, green fill for the
latest day, a blue marker at the 100% linear pace position, and the daily
run-rate still needed to reach the monthly goal. Companies missing from the
goals tab render against a zero goal rather than failing the report.")]
    /// Render per-company thermometer gauges in the terminal
    Report {
        /// Path to the Excel workbook (.xlsx or .xls)
        file: PathBuf,

        /// Render only one metric section
        #[arg(short, long)]
        metric: Option<MetricArg>,

        /// Total working days in the month
        #[arg(long, default_value_t = 22, value_parser = clap::value_parser!(u32).range(1..=31))]
        total_days: u32,

        /// Per-company total-days override, e.g. --days "Acme=19" (repeatable)
        #[arg(long = "days", value_name = "COMPANY=N", value_parser = parse_days_override)]
        days: Vec<(String, u32)>,

        /// First data column of the daily tab (Excel reference)
        #[arg(long, default_value = "AA")]
        data_start: String,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show workbook-wide totals, goal and days elapsed
    Summary {
        /// Path to the Excel workbook (.xlsx or .xls)
        file: PathBuf,

        /// First data column of the daily tab (Excel reference)
        #[arg(long, default_value = "AA")]
        data_start: String,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Export the tidy table for downstream consumers.

The output format follows the extension: .xlsx writes a \"Daily\" worksheet
(one row per day/company observation, goals attached) plus a \"Pacing\"
worksheet; .json writes the same records with per-company pacing inline.")]
    /// Write the tidy table (+ pacing) to .xlsx or .json
    Export {
        /// Path to the Excel workbook (.xlsx or .xls)
        input: PathBuf,

        /// Output path (.xlsx or .json)
        output: PathBuf,

        /// Total working days in the month
        #[arg(long, default_value_t = 22, value_parser = clap::value_parser!(u32).range(1..=31))]
        total_days: u32,

        /// Per-company total-days override, e.g. --days "Acme=19" (repeatable)
        #[arg(long = "days", value_name = "COMPANY=N", value_parser = parse_days_override)]
        days: Vec<(String, u32)>,

        /// First data column of the daily tab (Excel reference)
        #[arg(long, default_value = "AA")]
        data_start: String,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Watch the workbook and re-render on change.

Re-reads the file after every save; byte-identical content is detected via a
content digest and skipped instead of recomputed. Press Ctrl+C to stop.")]
    /// Re-render the report whenever the workbook changes
    Watch {
        /// Path to the Excel workbook (.xlsx or .xls)
        file: PathBuf,

        /// Render only one metric section
        #[arg(short, long)]
        metric: Option<MetricArg>,

        /// Total working days in the month
        #[arg(long, default_value_t = 22, value_parser = clap::value_parser!(u32).range(1..=31))]
        total_days: u32,

        /// Per-company total-days override, e.g. --days "Acme=19" (repeatable)
        #[arg(long = "days", value_name = "COMPANY=N", value_parser = parse_days_override)]
        days: Vec<(String, u32)>,

        /// First data column of the daily tab (Excel reference)
        #[arg(long, default_value = "AA")]
        data_start: String,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn days_config(total_days: u32, overrides: Vec<(String, u32)>) -> DaysConfig {
    let mut config = DaysConfig::new(total_days);
    for (company, days) in overrides {
        config.set_override(company, days);
    }
    config
}

fn start_col(data_start: &str) -> ThermoResult<usize> {
    column_index(data_start).ok_or_else(|| {
        ThermoError::Validation(format!(
            "invalid --data-start column reference '{data_start}'"
        ))
    })
}

fn main() -> ThermoResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            file,
            metric,
            total_days,
            days,
            data_start,
            verbose,
        } => {
            let options = ReportOptions {
                days: days_config(total_days, days),
                start_col: start_col(&data_start)?,
                metric: metric.map(Metric::from),
                verbose,
            };
            cli::report(file, &options)
        }

        Commands::Summary {
            file,
            data_start,
            verbose,
        } => cli::summary(file, start_col(&data_start)?, verbose),

        Commands::Export {
            input,
            output,
            total_days,
            days,
            data_start,
            verbose,
        } => cli::export(
            input,
            output,
            &days_config(total_days, days),
            start_col(&data_start)?,
            verbose,
        ),

        Commands::Watch {
            file,
            metric,
            total_days,
            days,
            data_start,
            verbose,
        } => {
            let options = ReportOptions {
                days: days_config(total_days, days),
                start_col: start_col(&data_start)?,
                metric: metric.map(Metric::from),
                verbose,
            };
            cli::watch(file, &options)
        }
    }
}
