use crate::dependency_tree::domain::ProjectKey;

/// Notifications emitted while scans progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A manager started building and scanning its project
    ScanStarted(ProjectKey),
    /// A manager published a new canonical tree for its project
    ProjectIssuesChanged(ProjectKey),
    /// A full scan is about to start; all views should be cleared
    ScanReset,
}

/// ScanEventPublisher port for the view/notification sink
pub trait ScanEventPublisher: Send + Sync {
    fn publish(&self, event: ScanEvent);
}
