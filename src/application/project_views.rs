use crate::dependency_tree::domain::{DependencyNode, Issue, ProjectKey};
use crate::dependency_tree::services::{FilterState, TreeFilter};
use crate::ports::outbound::ScanEvent;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// Read access to the canonical trees owned by scan managers
pub trait CanonicalTreeSource: Send + Sync {
    fn project_keys(&self) -> Vec<ProjectKey>;
    fn canonical_tree(&self, key: &ProjectKey) -> Option<Arc<DependencyNode>>;
}

/// ProjectViews - filtered, display-ready projections per project
///
/// Follows scan events: a project is re-projected when its manager
/// publishes a new canonical tree, and everything is cleared when a full
/// scan starts. Changing the filter re-projects every known project from
/// its current canonical snapshot without rescanning.
#[derive(Debug, Default)]
pub struct ProjectViews {
    filter: FilterState,
    projections: BTreeMap<ProjectKey, DependencyNode>,
}

impl ProjectViews {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            projections: BTreeMap::new(),
        }
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter_state(&mut self, filter: FilterState, source: &dyn CanonicalTreeSource) {
        self.filter = filter;
        self.refresh_all(source);
    }

    pub fn handle_event(&mut self, event: &ScanEvent, source: &dyn CanonicalTreeSource) {
        match event {
            ScanEvent::ScanStarted(key) => debug!(project = %key, "Scan started"),
            ScanEvent::ProjectIssuesChanged(key) => self.refresh_project(key, source),
            ScanEvent::ScanReset => self.projections.clear(),
        }
    }

    /// Applies every event currently queued on `events`
    ///
    /// Returns the number of events handled. A lagging receiver lost
    /// events, so every project is re-projected instead.
    pub fn drain(
        &mut self,
        events: &mut broadcast::Receiver<ScanEvent>,
        source: &dyn CanonicalTreeSource,
    ) -> usize {
        let mut handled = 0;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    self.handle_event(&event, source);
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Scan event receiver lagged, refreshing all views");
                    self.refresh_all(source);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        handled
    }

    pub fn refresh_project(&mut self, key: &ProjectKey, source: &dyn CanonicalTreeSource) {
        match source.canonical_tree(key) {
            Some(canonical) => {
                let projection = TreeFilter::apply_filters(&canonical, &self.filter);
                self.projections.insert(key.clone(), projection);
            }
            None => {
                self.projections.remove(key);
            }
        }
    }

    fn refresh_all(&mut self, source: &dyn CanonicalTreeSource) {
        self.projections.clear();
        for key in source.project_keys() {
            self.refresh_project(&key, source);
        }
    }

    pub fn projection(&self, key: &ProjectKey) -> Option<&DependencyNode> {
        self.projections.get(key)
    }

    pub fn projections(&self) -> impl Iterator<Item = (&ProjectKey, &DependencyNode)> {
        self.projections.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    /// Issues visible under the current filter, deduplicated across projects
    pub fn distinct_issues(&self) -> BTreeSet<&Issue> {
        self.projections
            .values()
            .flat_map(|tree| tree.aggregated_issues().iter())
            .collect()
    }

    pub fn distinct_issue_count(&self) -> usize {
        self.distinct_issues().len()
    }
}
