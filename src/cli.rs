use clap::Parser;
use std::path::PathBuf;

use polyscan::application::dto::OutputFormat;
use polyscan::config::{self, Settings};
use polyscan::dependency_tree::domain::Severity;
use polyscan::logging::LogFormat;
use polyscan::shared::Result;

/// Scan Maven, Gradle, npm and Go dependency trees for vulnerabilities and licenses
#[derive(Parser, Debug)]
#[command(name = "polyscan")]
#[command(version)]
#[command(
    about = "Scan Maven, Gradle, npm and Go dependency trees for vulnerabilities and licenses",
    long_about = None
)]
pub struct Args {
    /// Path to the workspace directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Config file (defaults to polyscan.config.yml in the workspace, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON export of the workspace's Maven/Gradle modules
    /// (defaults to polyscan.workspace.json in the workspace, if present)
    #[arg(short, long, value_name = "FILE")]
    pub workspace_model: Option<PathBuf>,

    /// Scan server URL; an empty value disables scanning
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Reuse cached scan results where available
    ///
    /// The cache lives in memory, so only repeated scans inside one process
    /// (library use) benefit. A single CLI run starts empty and scans every
    /// component.
    #[arg(long)]
    pub quick: bool,

    /// Show only issues of this severity (repeatable)
    #[arg(short, long = "severity", value_name = "SEVERITY")]
    pub severities: Vec<Severity>,

    /// Show only licenses with this name (repeatable)
    #[arg(short, long = "license", value_name = "LICENSE")]
    pub licenses: Vec<String>,

    /// Show only nodes in this scope, e.g. compile, test, prod, dev (repeatable)
    #[arg(long = "scope", value_name = "SCOPE")]
    pub scopes: Vec<String>,

    /// Skip directories matching patterns during manifest discovery (supports wildcards: *)
    /// Can be specified multiple times: -e "node_modules" -e "**/build/*"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Maximum concurrent scan-service requests per project
    #[arg(long, value_name = "N")]
    pub max_concurrent_requests: Option<usize>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colors in text output
    #[arg(long)]
    pub no_color: bool,

    /// Diagnostic log level or filter directive (e.g. debug, polyscan=trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Diagnostic log format: pretty, json or compact
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Overrides file settings with the flags given on the command line
    ///
    /// # Errors
    /// Returns an error for an out-of-range concurrency limit
    pub fn apply_to(&self, settings: &mut Settings) -> Result<()> {
        if let Some(url) = &self.server_url {
            settings.server_url = url.trim().to_string();
        }
        if self.quick {
            settings.quick_scan = true;
        }
        if !self.exclude.is_empty() {
            settings.excluded_paths.extend(self.exclude.iter().cloned());
        }
        if let Some(limit) = self.max_concurrent_requests {
            config::validate_concurrency(limit)?;
            settings.max_concurrent_requests = limit;
        }

        let mut filter = settings.filter.clone();
        if !self.severities.is_empty() {
            filter = filter.with_severities(self.severities.iter().copied());
        }
        if !self.licenses.is_empty() {
            filter = filter.with_licenses(self.licenses.iter().cloned());
        }
        if !self.scopes.is_empty() {
            filter = filter.with_scopes(self.scopes.iter().cloned());
        }
        settings.filter = filter;

        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        Ok(())
    }
}
