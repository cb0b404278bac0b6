//! Configuration file support for polyscan.
//!
//! Provides YAML-based configuration through `polyscan.config.yml` files,
//! including the file schema, loading, validation, and the resolved
//! `Settings` the scan runs with.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::adapters::outbound::network::OsvScanService;
use crate::dependency_tree::domain::Severity;
use crate::dependency_tree::services::{FilterState, PathFilter};
use crate::logging::{LogFormat, DEFAULT_LOG_LEVEL};
use crate::ports::outbound::SettingsProvider;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "polyscan.config.yml";

/// Default bound on concurrent scan-service calls per project
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Upper bound accepted for `max_concurrent_requests`
const MAX_CONCURRENT_REQUESTS_LIMIT: usize = 64;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub excluded_paths: Option<Vec<String>>,
    pub max_concurrent_requests: Option<usize>,
    /// Only has an effect on rescans within one process; see `--quick`
    pub quick_scan: Option<bool>,
    pub filters: Option<FiltersConfig>,
    pub log: Option<LogConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Scan server connection.
#[derive(Debug, Deserialize, Default)]
pub struct ServerConfig {
    pub url: Option<String>,
    pub access_token: Option<String>,
}

/// Initial filter selection; an absent list selects everything.
#[derive(Debug, Deserialize, Default)]
pub struct FiltersConfig {
    pub severities: Option<Vec<String>>,
    pub licenses: Option<Vec<String>>,
    pub scopes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref patterns) = config.excluded_paths {
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                bail!(
                    "Invalid config: excluded_paths[{}] must not be empty.\n\n\
                     💡 Hint: Use a directory name or wildcard pattern (e.g., \"**/build/*\").",
                    i
                );
            }
        }
        PathFilter::new(patterns).context("Invalid config: excluded_paths")?;
    }

    if let Some(limit) = config.max_concurrent_requests {
        validate_concurrency(limit)?;
    }

    if let Some(severities) = config.filters.as_ref().and_then(|f| f.severities.as_ref()) {
        parse_severities(severities).context("Invalid config: filters.severities")?;
    }

    if let Some(format) = config.log.as_ref().and_then(|l| l.format.as_deref()) {
        format
            .parse::<LogFormat>()
            .context("Invalid config: log.format")?;
    }

    Ok(())
}

pub fn validate_concurrency(limit: usize) -> Result<()> {
    if limit == 0 || limit > MAX_CONCURRENT_REQUESTS_LIMIT {
        bail!(
            "Invalid config: max_concurrent_requests must be between 1 and {} (got {}).",
            MAX_CONCURRENT_REQUESTS_LIMIT,
            limit
        );
    }
    Ok(())
}

pub(crate) fn parse_severities(values: &[String]) -> Result<Vec<Severity>> {
    values
        .iter()
        .map(|value| value.parse::<Severity>().map_err(anyhow::Error::from))
        .collect()
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Settings a scan runs with: config file values over built-in defaults.
/// CLI flags are applied on top by the binary.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Empty means no scan server is configured
    pub server_url: String,
    pub access_token: Option<String>,
    pub excluded_paths: Vec<String>,
    pub max_concurrent_requests: usize,
    pub quick_scan: bool,
    pub filter: FilterState,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: OsvScanService::DEFAULT_SERVER_URL.to_string(),
            access_token: None,
            excluded_paths: Vec::new(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            quick_scan: false,
            filter: FilterState::all(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Resolves a validated config file into settings
    ///
    /// # Errors
    /// Returns an error for values that fail to parse
    pub fn from_config(config: ConfigFile) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(server) = config.server {
            if let Some(url) = server.url {
                settings.server_url = url.trim().to_string();
            }
            settings.access_token = server.access_token.filter(|t| !t.trim().is_empty());
        }
        if let Some(patterns) = config.excluded_paths {
            settings.excluded_paths = patterns;
        }
        if let Some(limit) = config.max_concurrent_requests {
            settings.max_concurrent_requests = limit;
        }
        if let Some(quick_scan) = config.quick_scan {
            settings.quick_scan = quick_scan;
        }
        if let Some(filters) = config.filters {
            let mut filter = FilterState::all();
            if let Some(severities) = filters.severities {
                filter = filter.with_severities(parse_severities(&severities)?);
            }
            if let Some(licenses) = filters.licenses {
                filter = filter.with_licenses(licenses);
            }
            if let Some(scopes) = filters.scopes {
                filter = filter.with_scopes(scopes);
            }
            settings.filter = filter;
        }
        if let Some(log) = config.log {
            if let Some(level) = log.level {
                settings.log_level = level;
            }
            if let Some(format) = log.format {
                settings.log_format = format.parse()?;
            }
        }

        Ok(settings)
    }
}

impl SettingsProvider for Settings {
    fn are_credentials_set(&self) -> bool {
        !self.server_url.trim().is_empty()
    }

    fn excluded_paths(&self) -> Vec<String> {
        self.excluded_paths.clone()
    }
}
