//! Diagnostic logging setup.
//!
//! Library code only emits `tracing` events; the binary installs one
//! subscriber here. Output goes to stderr so that a report printed on
//! stdout stays machine-readable. `RUST_LOG` takes precedence over the
//! configured level.

use crate::shared::error::ScanError;
use crate::shared::Result;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG`, the config file nor the CLI set one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Line format of diagnostic logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// One JSON object per event
    Json,
    /// Single-line human-readable output
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = ScanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(ScanError::Validation {
                message: format!(
                    "Unknown log format '{}'. Expected one of: pretty, json, compact",
                    s
                ),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Compact => write!(f, "compact"),
        }
    }
}

/// Builds the level filter, preferring `RUST_LOG` when it is set
///
/// # Errors
/// Returns an error when `level` is not a valid filter directive
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| {
        ScanError::Validation {
            message: format!("Invalid log level '{}': {}", level, e),
        }
        .into()
    })
}

/// Initialize the global tracing subscriber.
///
/// Must be called at most once per process.
///
/// # Errors
/// Returns an error for an invalid level or when a subscriber is already installed
pub fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = env_filter(level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };
    installed
        .map_err(|e| anyhow::anyhow!("failed to initialize {} tracing subscriber: {}", format, e))
}
