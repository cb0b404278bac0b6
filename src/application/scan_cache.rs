use crate::dependency_tree::domain::ComponentId;
use crate::ports::outbound::ComponentScanResult;
use dashmap::DashMap;
use std::collections::HashSet;

/// Quick-scan cache of per-component scan results.
///
/// One cache lives in each scan manager and survives registry refreshes
/// together with the manager. Keyed by component identity plus version,
/// so a version bump is always a cache miss.
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: DashMap<ComponentId, ComponentScanResult>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, component: &ComponentId) -> Option<ComponentScanResult> {
        self.entries.get(component).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, component: ComponentId, result: ComponentScanResult) {
        self.entries.insert(component, result);
    }

    /// Drops every entry not in `current`; returns how many were dropped
    pub fn retain_only(&self, current: &HashSet<ComponentId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|component, _| current.contains(component));
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
