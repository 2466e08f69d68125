use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let today = match non_empty_var("TASKLIST_TODAY") {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|source| ConfigError::InvalidToday { value: raw, source })?,
            ),
            None => None,
        };

        let hours_used_today = match non_empty_var("TASKLIST_HOURS_USED_TODAY") {
            Some(raw) => parse_hours_used(&raw)
                .ok_or(ConfigError::InvalidHoursUsed { value: raw })?,
            None => 0.0,
        };

        let tasks_csv = non_empty_var("TASKLIST_TASKS_CSV").map(PathBuf::from);
        let availability_csv = non_empty_var("TASKLIST_AVAILABILITY_CSV").map(PathBuf::from);

        let log_level = env::var("TASKLIST_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            report: ReportConfig {
                today,
                hours_used_today,
                tasks_csv,
                availability_csv,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_hours_used(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
}

/// Inputs for a single report run. CLI arguments override these.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Evaluation date; `None` means the local date at run time.
    pub today: Option<NaiveDate>,
    pub hours_used_today: f64,
    pub tasks_csv: Option<PathBuf>,
    pub availability_csv: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidToday {
        value: String,
        source: chrono::ParseError,
    },
    InvalidHoursUsed {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidToday { value, .. } => {
                write!(f, "TASKLIST_TODAY must be a YYYY-MM-DD date (got '{value}')")
            }
            ConfigError::InvalidHoursUsed { value } => write!(
                f,
                "TASKLIST_HOURS_USED_TODAY must be a non-negative number (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidToday { source, .. } => Some(source),
            ConfigError::InvalidHoursUsed { .. } => None,
        }
    }
}
