use crate::dependency_tree::services::FilterState;
use crate::ports::outbound::LibraryDependency;

/// ScanRequest - input of the workspace scan use case
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// Serve components already in a manager's cache without a service call
    pub quick_scan: bool,
    /// Filter applied to the projections in the report
    pub filter: FilterState,
    /// Library dependencies from the latest build import (Gradle)
    pub extra_deps: Option<Vec<LibraryDependency>>,
}

impl ScanRequest {
    pub fn new(quick_scan: bool, filter: FilterState) -> Self {
        Self {
            quick_scan,
            filter,
            extra_deps: None,
        }
    }

    pub fn with_extra_deps(mut self, extra_deps: Vec<LibraryDependency>) -> Self {
        self.extra_deps = Some(extra_deps);
        self
    }
}
