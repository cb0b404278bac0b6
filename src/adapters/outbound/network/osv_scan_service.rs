use super::cvss;
use crate::dependency_tree::domain::{ComponentId, ComponentPrefix, Issue, License, Severity};
use crate::ports::outbound::{ComponentScanResult, ScanService};
use crate::shared::error::ScanError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, warn};

/// OsvScanService adapter for the ScanService port
///
/// Issues come from the OSV query API (`POST {server}/v1/query`), licenses
/// from the deps.dev version endpoint. A license lookup failure leaves the
/// component without licenses; an OSV failure fails the component.
pub struct OsvScanService {
    client: reqwest::Client,
    server_url: String,
    license_api_url: String,
    access_token: Option<String>,
    max_retries: u32,
}

impl OsvScanService {
    pub const DEFAULT_SERVER_URL: &'static str = "https://api.osv.dev";
    const LICENSE_API_URL: &'static str = "https://api.deps.dev/v3";
    const TIMEOUT_SECONDS: u64 = 30;

    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(server_url: &str, access_token: Option<String>) -> Result<Self> {
        let user_agent = format!("polyscan/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
            license_api_url: Self::LICENSE_API_URL.to_string(),
            access_token,
            max_retries: 3,
        })
    }

    async fn with_retry<T, F, Fut>(&self, mut request: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match request().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_retries => {
                    debug!(attempt, error = %e, "Request failed, retrying");
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn query_vulnerabilities(&self, component: &ComponentId) -> Result<Vec<OsvVulnerability>> {
        let query = OsvQuery::for_component(component);
        let url = format!("{}/v1/query", self.server_url);

        let mut request = self.client.post(&url).json(&query);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }
        let body: OsvQueryResponse = response.json().await?;
        Ok(body.vulns)
    }

    async fn fetch_licenses(&self, component: &ComponentId) -> Result<BTreeSet<License>> {
        validate_url_component(component.name(), "Package name")?;
        validate_url_component(component.version(), "Version")?;

        let url = format!(
            "{}/systems/{}/packages/{}/versions/{}",
            self.license_api_url,
            deps_dev_system(component.prefix()),
            urlencoding::encode(component.name()),
            urlencoding::encode(component.version()),
        );
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(BTreeSet::new());
        }
        if !response.status().is_success() {
            anyhow::bail!("deps.dev API returned status code {}", response.status());
        }
        let body: DepsDevVersion = response.json().await?;
        Ok(body.licenses.iter().map(|name| license_from_name(name)).collect())
    }
}

#[async_trait]
impl ScanService for OsvScanService {
    async fn scan(&self, component: &ComponentId) -> Result<ComponentScanResult> {
        let vulns = self
            .with_retry(|| self.query_vulnerabilities(component))
            .await
            .map_err(|e| ScanError::ScanService {
                component: component.to_string(),
                details: e.to_string(),
            })?;

        let licenses = match self.with_retry(|| self.fetch_licenses(component)).await {
            Ok(licenses) => licenses,
            Err(e) => {
                warn!(component = %component, error = %e, "License lookup failed");
                BTreeSet::new()
            }
        };

        let issues = vulns
            .iter()
            .map(|vuln| convert_to_issue(vuln, component))
            .collect();
        Ok(ComponentScanResult::new(issues, licenses))
    }
}

/// Rejects identifiers that cannot be a package name or version
fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("{} is empty", component_type);
    }
    if component.chars().any(|c| c.is_control() || c.is_whitespace()) {
        anyhow::bail!(
            "Security: {} contains whitespace or control characters",
            component_type
        );
    }
    if component.split('/').any(|segment| segment == "..") {
        anyhow::bail!("Security: {} contains '..' segments", component_type);
    }
    Ok(())
}

fn osv_ecosystem(prefix: ComponentPrefix) -> &'static str {
    match prefix {
        ComponentPrefix::Gav => "Maven",
        ComponentPrefix::Npm => "npm",
        ComponentPrefix::Go => "Go",
    }
}

fn deps_dev_system(prefix: ComponentPrefix) -> &'static str {
    match prefix {
        ComponentPrefix::Gav => "maven",
        ComponentPrefix::Npm => "npm",
        ComponentPrefix::Go => "go",
    }
}

/// SPDX identifiers link to their SPDX page; free-form names carry no link
fn license_from_name(name: &str) -> License {
    let is_spdx_id = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '+'));
    if is_spdx_id {
        License::new(name).with_more_info_url(format!("https://spdx.org/licenses/{}.html", name))
    } else {
        License::new(name)
    }
}

/// Severity from the CVSS v3 vector if present, else the database's own label
fn severity_of(vuln: &OsvVulnerability) -> Severity {
    let cvss_score = vuln
        .severity
        .iter()
        .filter(|s| s.severity_type == "CVSS_V3")
        .find_map(|s| cvss::base_score(&s.score));

    if let Some(score) = cvss_score {
        return Severity::from_cvss_score(score);
    }
    vuln.database_specific
        .as_ref()
        .and_then(|db| db.severity.as_deref())
        .map(Severity::parse_lenient)
        .unwrap_or(Severity::Unknown)
}

fn convert_to_issue(vuln: &OsvVulnerability, component: &ComponentId) -> Issue {
    let summary = vuln
        .summary
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            vuln.details
                .as_deref()
                .and_then(|d| d.lines().next())
                .map(str::to_string)
        })
        .unwrap_or_else(|| vuln.id.clone());

    let mut affected_versions = Vec::new();
    let mut fixed_versions = Vec::new();
    for range in vuln.affected.iter().flat_map(|a| a.ranges.iter()) {
        let mut introduced: Option<&str> = None;
        for event in &range.events {
            if let Some(start) = event.introduced.as_deref() {
                introduced = Some(start);
            }
            let end = event.fixed.as_deref().or(event.last_affected.as_deref());
            if let Some(fixed) = event.fixed.as_deref() {
                fixed_versions.push(fixed.to_string());
            }
            if let (Some(start), Some(end)) = (introduced, end) {
                let upper = if event.fixed.is_some() { "<" } else { "<=" };
                affected_versions.push(format_range(start, upper, end));
                introduced = None;
            }
        }
        if let Some(start) = introduced {
            affected_versions.push(format_range(start, "", ""));
        }
    }
    fixed_versions.dedup();

    Issue::new(
        vuln.id.clone(),
        severity_of(vuln),
        summary,
        component.to_string(),
    )
    .with_affected_versions(affected_versions)
    .with_fixed_versions(fixed_versions)
}

fn format_range(introduced: &str, upper_op: &str, upper: &str) -> String {
    let lower = (introduced != "0").then(|| format!(">={}", introduced));
    let upper = (!upper.is_empty()).then(|| format!("{}{}", upper_op, upper));
    match (lower, upper) {
        (Some(lower), Some(upper)) => format!("{}, {}", lower, upper),
        (Some(lower), None) => lower,
        (None, Some(upper)) => upper,
        (None, None) => "*".to_string(),
    }
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
}

impl OsvQuery {
    fn for_component(component: &ComponentId) -> Self {
        let version = match component.prefix() {
            // OSV records Go versions without the leading "v"
            ComponentPrefix::Go => component.version().trim_start_matches('v'),
            _ => component.version(),
        };
        Self {
            package: OsvPackage {
                name: component.name().to_string(),
                ecosystem: osv_ecosystem(component.prefix()).to_string(),
            },
            version: version.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String,
}

#[derive(Debug, Deserialize)]
struct OsvQueryResponse {
    #[serde(default)]
    vulns: Vec<OsvVulnerability>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    severity: Vec<OsvSeverity>,
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
    #[serde(default)]
    affected: Vec<OsvAffected>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String,
    score: String,
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsvAffected {
    #[serde(default)]
    ranges: Vec<OsvRange>,
}

#[derive(Debug, Deserialize)]
struct OsvRange {
    #[serde(default)]
    events: Vec<OsvEvent>,
}

#[derive(Debug, Deserialize)]
struct OsvEvent {
    #[serde(default)]
    introduced: Option<String>,
    #[serde(default)]
    fixed: Option<String>,
    #[serde(default)]
    last_affected: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DepsDevVersion {
    #[serde(default)]
    licenses: Vec<String>,
}
