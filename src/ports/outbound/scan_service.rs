use crate::dependency_tree::domain::{ComponentId, Issue, License};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Issues and licenses the scan service knows for one component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentScanResult {
    pub issues: BTreeSet<Issue>,
    pub licenses: BTreeSet<License>,
}

impl ComponentScanResult {
    pub fn new(issues: BTreeSet<Issue>, licenses: BTreeSet<License>) -> Self {
        Self { issues, licenses }
    }
}

/// ScanService port for the remote vulnerability/license service
///
/// # Async Support
/// Calls are issued concurrently by scan managers, so implementations
/// must be `Send + Sync`.
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Looks up issues and licenses for one component
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be parsed.
    /// Callers treat errors per component and never abort the whole scan.
    async fn scan(&self, component: &ComponentId) -> Result<ComponentScanResult>;
}
