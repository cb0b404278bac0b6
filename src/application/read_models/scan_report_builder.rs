//! Builder for constructing ScanReport from scan summaries and projections

use super::scan_report::{
    FailedProjectView, ProjectReportView, ReportMetadataView, ScanReport, SeverityCountView,
};
use crate::application::project_views::ProjectViews;
use crate::application::scan_manager::{ScanOutcome, ScanSummary};
use crate::dependency_tree::domain::{Ecosystem, Severity};
use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Result of one manager's scan task, as collected by the caller
#[derive(Debug, Clone)]
pub struct ProjectRun {
    pub ecosystem: Ecosystem,
    pub summary: ScanSummary,
}

/// Builder for constructing ScanReport
pub struct ScanReportBuilder;

impl ScanReportBuilder {
    /// Builds a ScanReport from finished runs and the current projections
    ///
    /// # Arguments
    /// * `runs` - One entry per dispatched manager
    /// * `views` - Projections under the active filter
    pub fn build(runs: &[ProjectRun], views: &ProjectViews) -> ScanReport {
        let mut projects = Vec::new();
        let mut failed_projects = Vec::new();

        for run in runs {
            let key = &run.summary.project;
            if let ScanOutcome::Failed(reason) = &run.summary.outcome {
                failed_projects.push(FailedProjectView {
                    name: key.name().to_string(),
                    path: key.path().to_path_buf(),
                    reason: reason.clone(),
                });
                continue;
            }
            let Some(tree) = views.projection(key) else {
                continue;
            };
            projects.push(ProjectReportView {
                name: key.name().to_string(),
                path: key.path().to_path_buf(),
                ecosystem: run.ecosystem,
                components: run.summary.components,
                from_cache: run.summary.from_cache,
                failed_components: run.summary.failed,
                issues: tree.aggregated_issues().len(),
                tree: tree.clone(),
            });
        }

        ScanReport {
            metadata: Self::build_metadata(),
            projects,
            failed_projects,
            severity_counts: Self::build_severity_counts(views),
            distinct_issues: views.distinct_issue_count(),
        }
    }

    fn build_metadata() -> ReportMetadataView {
        ReportMetadataView {
            timestamp: Utc::now().to_rfc3339(),
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            run_id: format!("urn:uuid:{}", Uuid::new_v4()),
        }
    }

    /// Counts distinct issues per severity, highest first, omitting zeros
    fn build_severity_counts(views: &ProjectViews) -> Vec<SeverityCountView> {
        let mut counts: BTreeMap<Severity, usize> = BTreeMap::new();
        for issue in views.distinct_issues() {
            *counts.entry(issue.severity()).or_default() += 1;
        }
        counts
            .into_iter()
            .rev()
            .map(|(severity, count)| SeverityCountView { severity, count })
            .collect()
    }
}
