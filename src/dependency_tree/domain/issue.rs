use crate::shared::error::ScanError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Issue severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Unknown,
    Information,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Unknown,
        Severity::Information,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Maps a CVSS base score to a severity bucket
    pub fn from_cvss_score(score: f32) -> Self {
        if score >= 9.0 {
            Severity::Critical
        } else if score >= 7.0 {
            Severity::High
        } else if score >= 4.0 {
            Severity::Medium
        } else if score > 0.0 {
            Severity::Low
        } else {
            Severity::Unknown
        }
    }

    /// Lenient parse of the strings scan services emit.
    /// Anything unrecognised becomes `Unknown`.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or(Severity::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "Unknown",
            Severity::Information => "Information",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(Severity::Critical),
            "HIGH" => Ok(Severity::High),
            "MEDIUM" | "MODERATE" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            "INFORMATION" | "INFO" | "NONE" => Ok(Severity::Information),
            "UNKNOWN" => Ok(Severity::Unknown),
            _ => Err(ScanError::Validation {
                message: format!(
                    "Invalid severity '{}'. Expected one of: critical, high, medium, low, information, unknown",
                    s
                ),
            }),
        }
    }
}

/// A vulnerability reported against one component.
///
/// Equality covers every field so that sets of issues deduplicate only
/// true duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Issue {
    id: String,
    severity: Severity,
    summary: String,
    component: String,
    affected_versions: Vec<String>,
    fixed_versions: Vec<String>,
}

impl Issue {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        summary: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            summary: summary.into(),
            component: component.into(),
            affected_versions: Vec::new(),
            fixed_versions: Vec::new(),
        }
    }

    pub fn with_affected_versions(mut self, versions: Vec<String>) -> Self {
        self.affected_versions = versions;
        self
    }

    pub fn with_fixed_versions(mut self, versions: Vec<String>) -> Self {
        self.fixed_versions = versions;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn affected_versions(&self) -> &[String] {
        &self.affected_versions
    }

    pub fn fixed_versions(&self) -> &[String] {
        &self.fixed_versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Unknown < Severity::Information);
        assert!(Severity::Information < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_from_cvss_score() {
        assert_eq!(Severity::from_cvss_score(9.8), Severity::Critical);
        assert_eq!(Severity::from_cvss_score(9.0), Severity::Critical);
        assert_eq!(Severity::from_cvss_score(7.5), Severity::High);
        assert_eq!(Severity::from_cvss_score(4.0), Severity::Medium);
        assert_eq!(Severity::from_cvss_score(0.1), Severity::Low);
        assert_eq!(Severity::from_cvss_score(0.0), Severity::Unknown);
    }

    #[test]
    fn test_severity_parse_lenient() {
        assert_eq!(Severity::parse_lenient("MODERATE"), Severity::Medium);
        assert_eq!(Severity::parse_lenient("high"), Severity::High);
        assert_eq!(Severity::parse_lenient(" Critical "), Severity::Critical);
        assert_eq!(Severity::parse_lenient("whatever"), Severity::Unknown);
    }

    #[test]
    fn test_severity_strict_parse_rejects_garbage() {
        assert!("sev-9".parse::<Severity>().is_err());
    }

    #[test]
    fn test_issue_set_semantics() {
        let a = Issue::new("CVE-2021-1", Severity::High, "bad", "npm://a:1.0");
        let b = a.clone();
        let c = Issue::new("CVE-2021-1", Severity::High, "bad", "npm://a:2.0");

        let set: BTreeSet<Issue> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_issue_versions() {
        let issue = Issue::new("GHSA-1", Severity::Low, "s", "go://x:v1")
            .with_affected_versions(vec![">=1.0.0 <1.2.0".to_string()])
            .with_fixed_versions(vec!["1.2.0".to_string()]);
        assert_eq!(issue.affected_versions(), [">=1.0.0 <1.2.0".to_string()]);
        assert_eq!(issue.fixed_versions(), ["1.2.0".to_string()]);
    }
}
