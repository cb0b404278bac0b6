use crate::application::scan_cache::ScanCache;
use crate::dependency_tree::builders::DependencyTreeBuilder;
use crate::dependency_tree::domain::{ComponentId, DependencyNode, Ecosystem, ProjectKey};
use crate::dependency_tree::services::ResultMerger;
use crate::ports::outbound::{
    ComponentScanResult, LibraryDependency, ProgressReporter, ScanEvent, ScanEventPublisher,
    ScanService,
};
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Lifecycle of one manager's scan.
///
/// `Idle -> BuildingTree -> AwaitingScanResults -> Merging -> Idle`.
/// Requests are only accepted in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    BuildingTree,
    AwaitingScanResults,
    Merging,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed,
    Failed(String),
}

/// What one scan pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub project: ProjectKey,
    pub components: usize,
    pub from_cache: usize,
    pub scanned: usize,
    pub failed: usize,
    /// Distinct issues in the published canonical tree
    pub issues: usize,
    pub outcome: ScanOutcome,
}

impl ScanSummary {
    pub(crate) fn failed(project: ProjectKey, reason: String) -> Self {
        Self {
            project,
            components: 0,
            from_cache: 0,
            scanned: 0,
            failed: 0,
            issues: 0,
            outcome: ScanOutcome::Failed(reason),
        }
    }
}

/// Collaborators every manager shares
#[derive(Clone)]
pub struct ScanDependencies {
    pub scan_service: Arc<dyn ScanService>,
    pub publisher: Arc<dyn ScanEventPublisher>,
    pub reporter: Arc<dyn ProgressReporter>,
    pub max_concurrent_requests: usize,
}

/// Owns the scan lifecycle and the canonical tree of one logical project
pub struct ScanManager {
    key: ProjectKey,
    builder: Box<dyn DependencyTreeBuilder>,
    deps: ScanDependencies,
    cache: ScanCache,
    state: Mutex<ScanState>,
    canonical: RwLock<Option<Arc<DependencyNode>>>,
}

/// Holds a manager out of `Idle`; dropping it (on success, error or
/// panic unwinding) returns the manager to `Idle`.
pub struct ScanGuard {
    manager: Arc<ScanManager>,
}

impl ScanGuard {
    fn advance(&self, state: ScanState) {
        debug!(project = %self.manager.key, state = ?state, "Scan state transition");
        *self.manager.lock_state() = state;
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        *self.manager.lock_state() = ScanState::Idle;
    }
}

impl ScanManager {
    pub fn new(key: ProjectKey, builder: Box<dyn DependencyTreeBuilder>, deps: ScanDependencies) -> Self {
        Self {
            key,
            builder,
            deps,
            cache: ScanCache::new(),
            state: Mutex::new(ScanState::Idle),
            canonical: RwLock::new(None),
        }
    }

    pub fn key(&self) -> &ProjectKey {
        &self.key
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.builder.ecosystem()
    }

    pub fn project_paths(&self) -> Vec<PathBuf> {
        self.builder.project_paths()
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    pub fn state(&self) -> ScanState {
        *self.lock_state()
    }

    pub fn is_scan_in_progress(&self) -> bool {
        self.state() != ScanState::Idle
    }

    /// Snapshot of the last published canonical tree
    pub fn canonical_tree(&self) -> Option<Arc<DependencyNode>> {
        self.canonical
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, ScanState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves the manager from `Idle` to `BuildingTree`.
    /// Returns `None` when a scan is already running.
    pub fn try_begin_scan(self: &Arc<Self>) -> Option<ScanGuard> {
        let mut state = self.lock_state();
        if *state != ScanState::Idle {
            return None;
        }
        *state = ScanState::BuildingTree;
        Some(ScanGuard {
            manager: Arc::clone(self),
        })
    }

    /// Starts a scan on a background task.
    ///
    /// The manager is claimed before the task is spawned, so of two
    /// concurrent calls exactly one gets a handle. Must be called from
    /// within a tokio runtime.
    pub fn scan_async(
        self: &Arc<Self>,
        quick_scan: bool,
        extra_deps: Option<Arc<[LibraryDependency]>>,
    ) -> Option<JoinHandle<ScanSummary>> {
        let Some(guard) = self.try_begin_scan() else {
            info!(project = %self.key, "Previous scan still running, request dropped");
            return None;
        };
        let manager = Arc::clone(self);
        Some(tokio::spawn(async move {
            manager.run_scan(guard, quick_scan, extra_deps).await
        }))
    }

    async fn run_scan(
        &self,
        guard: ScanGuard,
        quick_scan: bool,
        extra_deps: Option<Arc<[LibraryDependency]>>,
    ) -> ScanSummary {
        self.deps
            .publisher
            .publish(ScanEvent::ScanStarted(self.key.clone()));
        info!(project = %self.key, ecosystem = %self.ecosystem(), quick_scan, "Scan started");

        let mut tree = match self.builder.build_tree(extra_deps.as_deref()).await {
            Ok(tree) => tree,
            Err(e) => {
                warn!(project = %self.key, error = %e, "Failed to build dependency tree");
                self.deps.reporter.report_error(&format!(
                    "⚠️  {}: failed to build dependency tree: {}",
                    self.key, e
                ));
                return ScanSummary::failed(self.key.clone(), e.to_string());
            }
        };

        guard.advance(ScanState::AwaitingScanResults);
        let components = ResultMerger::components_to_scan(&tree);
        let total = components.len();
        let current: HashSet<ComponentId> = components.iter().cloned().collect();

        let mut results = HashMap::new();
        let mut to_fetch = Vec::new();
        for component in components {
            if quick_scan {
                if let Some(cached) = self.cache.get(&component) {
                    results.insert(component, cached);
                    continue;
                }
            }
            to_fetch.push(component);
        }
        let from_cache = results.len();
        let scanned = to_fetch.len();

        let (fetched, failed) = self.fetch_results(to_fetch).await;
        results.extend(fetched);

        guard.advance(ScanState::Merging);
        ResultMerger::merge(&mut tree, &results);
        let evicted = self.cache.retain_only(&current);
        if evicted > 0 {
            debug!(project = %self.key, evicted, "Dropped cache entries for removed components");
        }
        let issues = tree.aggregated_issues().len();
        self.publish_tree(tree);

        if failed > 0 {
            self.deps.reporter.report_error(&format!(
                "⚠️  {}: {} of {} components could not be scanned; partial results shown",
                self.key, failed, scanned
            ));
        }
        info!(
            project = %self.key,
            components = total,
            from_cache,
            scanned,
            failed,
            issues,
            "Scan finished"
        );

        ScanSummary {
            project: self.key.clone(),
            components: total,
            from_cache,
            scanned,
            failed,
            issues,
            outcome: ScanOutcome::Completed,
        }
    }

    /// Calls the scan service with bounded concurrency. Failures are
    /// logged and counted; successes are cached.
    async fn fetch_results(
        &self,
        components: Vec<ComponentId>,
    ) -> (HashMap<ComponentId, ComponentScanResult>, usize) {
        let total = components.len();
        let service = &self.deps.scan_service;
        let mut responses = stream::iter(components)
            .map(|component| async move {
                let result = service.scan(&component).await;
                (component, result)
            })
            .buffer_unordered(self.deps.max_concurrent_requests.max(1));

        let mut results = HashMap::new();
        let mut failed = 0;
        let mut done = 0;
        while let Some((component, response)) = responses.next().await {
            done += 1;
            match response {
                Ok(result) => {
                    self.cache.insert(component.clone(), result.clone());
                    results.insert(component, result);
                }
                Err(e) => {
                    failed += 1;
                    warn!(project = %self.key, component = %component, error = %e, "Scan service call failed");
                }
            }
            self.deps
                .reporter
                .report_progress(done, total, Some(self.key.name()));
        }
        (results, failed)
    }

    /// Replaces the canonical tree as a whole
    fn publish_tree(&self, tree: DependencyNode) {
        *self
            .canonical
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(tree));
        self.deps
            .publisher
            .publish(ScanEvent::ProjectIssuesChanged(self.key.clone()));
    }
}
