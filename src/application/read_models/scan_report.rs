//! Scan report read model

use crate::dependency_tree::domain::{DependencyNode, Ecosystem, Severity};
use serde::Serialize;
use std::path::PathBuf;

/// Everything the CLI prints after one orchestrated scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub metadata: ReportMetadataView,
    /// Projects with a projection, in registry order
    pub projects: Vec<ProjectReportView>,
    /// Projects whose scan did not complete
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_projects: Vec<FailedProjectView>,
    /// Distinct issues across all projections, highest severity first
    pub severity_counts: Vec<SeverityCountView>,
    pub distinct_issues: usize,
}

impl ScanReport {
    pub fn has_issues(&self) -> bool {
        self.distinct_issues > 0
    }

    /// True when a project could not be scanned or any of its components
    /// came back without results
    pub fn has_failures(&self) -> bool {
        !self.failed_projects.is_empty()
            || self.projects.iter().any(|p| p.failed_components > 0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadataView {
    /// RFC 3339 timestamp of report creation
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    /// `urn:uuid:` identifier of this run
    pub run_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectReportView {
    pub name: String,
    pub path: PathBuf,
    pub ecosystem: Ecosystem,
    pub components: usize,
    pub from_cache: usize,
    pub failed_components: usize,
    /// Distinct issues visible in `tree`
    pub issues: usize,
    pub tree: DependencyNode,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedProjectView {
    pub name: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityCountView {
    pub severity: Severity,
    pub count: usize,
}
