use crate::application::dto::{ScanRequest, ScanResponse};
use crate::application::orchestrator::{ScanDispatch, ScanOrchestrator};
use crate::application::project_views::ProjectViews;
use crate::application::read_models::{ProjectRun, ScanReportBuilder};
use crate::application::scan_manager::ScanSummary;
use crate::ports::outbound::{ProgressReporter, ScanEvent};
use crate::shared::Result;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, instrument};

/// ScanWorkspaceUseCase - one complete scan of the workspace
///
/// Dispatches every manager through the orchestrator, waits for all of
/// their tasks, follows the published scan events into filtered
/// projections and assembles the report.
pub struct ScanWorkspaceUseCase {
    orchestrator: Arc<ScanOrchestrator>,
    events: broadcast::Receiver<ScanEvent>,
    progress_reporter: Arc<dyn ProgressReporter>,
}

impl ScanWorkspaceUseCase {
    /// Creates the use case
    ///
    /// # Arguments
    /// * `orchestrator` - Registry and dispatcher of the scan managers
    /// * `events` - Receiver subscribed to the managers' event publisher
    /// * `progress_reporter` - User-facing log
    pub fn new(
        orchestrator: Arc<ScanOrchestrator>,
        events: broadcast::Receiver<ScanEvent>,
        progress_reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            orchestrator,
            events,
            progress_reporter,
        }
    }

    /// Executes the scan
    ///
    /// # Returns
    /// `ScanResponse::Skipped` when the orchestrator refused the request,
    /// otherwise the report over every project that was dispatched
    ///
    /// # Errors
    /// Returns an error when the project registry cannot be refreshed or
    /// the dispatch task panics
    #[instrument(skip_all, fields(quick_scan = request.quick_scan))]
    pub async fn execute(&mut self, request: ScanRequest) -> Result<ScanResponse> {
        // Registry refresh walks the filesystem
        let orchestrator = Arc::clone(&self.orchestrator);
        let quick_scan = request.quick_scan;
        let extra_deps = request.extra_deps;
        let dispatch = tokio::task::spawn_blocking(move || {
            orchestrator.start_scan(quick_scan, extra_deps)
        })
        .await
        .context("Scan dispatch task did not complete")??;

        let handles = match dispatch {
            ScanDispatch::Skipped(reason) => {
                info!(reason = ?reason, "Scan skipped");
                return Ok(ScanResponse::Skipped(reason));
            }
            ScanDispatch::Started(handles) => handles,
        };

        let mut runs = Vec::with_capacity(handles.len());
        for (key, handle) in handles {
            let summary = match handle.await {
                Ok(summary) => summary,
                Err(e) => {
                    error!(project = %key, error = %e, "Scan task did not complete");
                    ScanSummary::failed(key.clone(), format!("scan task aborted: {}", e))
                }
            };
            let Some(manager) = self.orchestrator.manager(&key) else {
                continue;
            };
            runs.push(ProjectRun {
                ecosystem: manager.ecosystem(),
                summary,
            });
        }

        let mut views = ProjectViews::new(request.filter);
        let handled = views.drain(&mut self.events, self.orchestrator.as_ref());
        info!(projects = runs.len(), events = handled, "All project scans finished");

        let report = ScanReportBuilder::build(&runs, &views);
        self.progress_reporter.report_completion(&format!(
            "✅ Scanned {} project(s), {} distinct issue(s) visible",
            report.projects.len(),
            report.distinct_issues
        ));
        Ok(ScanResponse::Completed(Box::new(report)))
    }
}
