use crate::config::TelemetryConfig;
use std::io::IsTerminal;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "tasklist";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Log detail requested on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Debug,
    Trace,
}

impl Verbosity {
    /// `verbose` is the number of `-v` flags given.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    fn level(self) -> Option<&'static str> {
        match self {
            Self::Quiet => Some("error"),
            Self::Normal => None,
            Self::Debug => Some("debug"),
            Self::Trace => Some("trace"),
        }
    }
}

/// Picks the filter directives: explicit `-v`/`-q` first, then `RUST_LOG`,
/// then the configured level.
pub fn filter_directives(
    verbosity: Verbosity,
    rust_log: Option<&str>,
    config: &TelemetryConfig,
) -> String {
    if let Some(level) = verbosity.level() {
        return scoped(level);
    }
    match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.to_string(),
        None => scoped(config.log_level.trim()),
    }
}

/// A bare level applies to this crate only; anything with targets passes through.
fn scoped(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("{CRATE_TARGET}={level}")
    }
}

fn build_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::Filter {
        value: directives.to_string(),
        source,
    })
}

/// Installs the global subscriber. Logs go to stderr; stdout carries the report.
pub fn init(config: &TelemetryConfig, verbosity: Verbosity) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(verbosity, rust_log.as_deref(), config);
    let filter = build_filter(&directives)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .compact(),
        )
        .try_init()?;
    Ok(())
}
