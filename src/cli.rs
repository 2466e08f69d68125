use crate::config::{AppConfig, ReportConfig};
use crate::error::AppError;
use crate::telemetry::{self, Verbosity};
use crate::workflows::csv_import::CsvWorkloadImporter;
use crate::workflows::tasklist::report::render_text;
use crate::workflows::tasklist::{embedded_workload, ReportKind, WorkloadPlanner};
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "tasklist",
    about = "Check whether your outstanding tasks fit the hours you have left",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    options: ReportArgs,
    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Task feasibility, overall summary and procrastination windows (default command)
    Report,
    /// Per-task buffer time and the overall workload summary
    Buffers,
    /// How long each due-date group can be put off
    Procrastinate,
}

impl Command {
    fn kind(self) -> ReportKind {
        match self {
            Command::Report => ReportKind::Full,
            Command::Buffers => ReportKind::Buffers,
            Command::Procrastinate => ReportKind::Procrastination,
        }
    }
}

#[derive(Args, Debug, Default)]
struct ReportArgs {
    /// Evaluation date for the report (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Hours already spent working today
    #[arg(long, global = true, value_parser = parse_hours)]
    hours_used_today: Option<f64>,
    /// CSV file with columns Name,Total Hours,Completed Hours,Due Date
    #[arg(long, global = true)]
    tasks_csv: Option<PathBuf>,
    /// CSV file with columns Date,Hours
    #[arg(long, global = true)]
    availability_csv: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, cli.verbosity())?;
    debug!(report = ?config.report, "configuration loaded");

    let output = execute(cli, &config.report)?;
    println!("{output}");
    Ok(())
}

/// Builds the requested report; CLI arguments take precedence over `defaults`.
pub fn execute(cli: Cli, defaults: &ReportConfig) -> Result<String, AppError> {
    let kind = cli.command.map(Command::kind).unwrap_or_default();
    let ReportArgs {
        today,
        hours_used_today,
        tasks_csv,
        availability_csv,
        format,
    } = cli.options;

    let today = today
        .or(defaults.today)
        .unwrap_or_else(|| Local::now().date_naive());
    let hours_used_today = hours_used_today.unwrap_or(defaults.hours_used_today);
    let tasks_csv = tasks_csv.or_else(|| defaults.tasks_csv.clone());
    let availability_csv = availability_csv.or_else(|| defaults.availability_csv.clone());

    let workload = CsvWorkloadImporter::overlay(
        embedded_workload(),
        tasks_csv.as_deref(),
        availability_csv.as_deref(),
    )?;

    let planner = WorkloadPlanner::new(&workload, today, hours_used_today)?;
    let summary = planner.report().summary(kind);

    match format {
        OutputFormat::Text => Ok(render_text(&summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_hours(raw: &str) -> Result<f64, String> {
    let hours = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as hours ({err})"))?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(format!("hours must be a non-negative number, got '{raw}'"));
    }
    Ok(hours)
}
