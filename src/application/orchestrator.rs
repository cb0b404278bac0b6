use crate::application::factories::ManagerFactory;
use crate::application::project_views::CanonicalTreeSource;
use crate::application::scan_manager::{ScanManager, ScanSummary};
use crate::dependency_tree::builders::{GradleTreeBuilder, MavenTreeBuilder};
use crate::dependency_tree::domain::{DependencyNode, Ecosystem, ProjectKey};
use crate::ports::outbound::{
    LibraryDependency, ManifestDiscovery, ProgressReporter, ScanEvent, ScanEventPublisher,
    SettingsProvider, WorkspaceIntrospection,
};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Why a scan request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host is still indexing the workspace
    Indexing,
    /// At least one manager is still scanning
    ScanInProgress,
    /// No scan server is configured
    CredentialsNotConfigured,
}

/// Result of a scan request
#[derive(Debug)]
pub enum ScanDispatch {
    Skipped(SkipReason),
    /// One background task per dispatched manager
    Started(Vec<(ProjectKey, JoinHandle<ScanSummary>)>),
}

/// Collaborators of the orchestrator
pub struct OrchestratorPorts {
    pub workspace: Arc<dyn WorkspaceIntrospection>,
    pub discovery: Arc<dyn ManifestDiscovery>,
    pub settings: Arc<dyn SettingsProvider>,
    pub publisher: Arc<dyn ScanEventPublisher>,
    pub reporter: Arc<dyn ProgressReporter>,
}

/// ScanOrchestrator - decides which projects exist and dispatches scans
///
/// Keeps one `ScanManager` per `ProjectKey`. The registry is rebuilt on
/// every refresh, reusing managers whose key (and ecosystem) survived so
/// that their cache and last results are kept.
pub struct ScanOrchestrator {
    ports: OrchestratorPorts,
    factory: ManagerFactory,
    managers: RwLock<BTreeMap<ProjectKey, Arc<ScanManager>>>,
    dispatch: Mutex<()>,
}

impl ScanOrchestrator {
    pub fn new(ports: OrchestratorPorts, factory: ManagerFactory) -> Self {
        Self {
            ports,
            factory,
            managers: RwLock::new(BTreeMap::new()),
            dispatch: Mutex::new(()),
        }
    }

    /// Snapshot of the registry in key order
    pub fn scan_managers(&self) -> Vec<Arc<ScanManager>> {
        self.read_registry().values().cloned().collect()
    }

    pub fn manager(&self, key: &ProjectKey) -> Option<Arc<ScanManager>> {
        self.read_registry().get(key).cloned()
    }

    pub fn is_scan_in_progress(&self) -> bool {
        self.read_registry()
            .values()
            .any(|manager| manager.is_scan_in_progress())
    }

    pub fn canonical_tree(&self, key: &ProjectKey) -> Option<Arc<DependencyNode>> {
        self.manager(key).and_then(|manager| manager.canonical_tree())
    }

    fn read_registry(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, BTreeMap<ProjectKey, Arc<ScanManager>>> {
        self.managers.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuilds the registry from the workspace model and manifest discovery.
    /// Blocks on filesystem I/O.
    ///
    /// # Errors
    /// Returns an error when manifest discovery fails; the previous
    /// registry is left in place.
    pub fn refresh_scan_managers(&self) -> Result<()> {
        let previous = self.read_registry().clone();
        let mut next: BTreeMap<ProjectKey, Arc<ScanManager>> = BTreeMap::new();

        let workspace = self.ports.workspace.as_ref();
        let base_path = workspace.base_path();
        let workspace_key = ProjectKey::new(workspace.project_name(), &base_path);

        // Gradle takes the workspace project when both build systems apply
        let workspace_kind = if GradleTreeBuilder::is_applicable(workspace) {
            Some(Ecosystem::Gradle)
        } else if MavenTreeBuilder::is_applicable(workspace) {
            Some(Ecosystem::Maven)
        } else {
            None
        };
        if let Some(kind) = workspace_kind {
            let manager = self.reuse_or_create(&previous, kind, workspace_key.clone(), &base_path);
            next.insert(workspace_key, manager);
        }

        let mut roots = vec![base_path];
        for manager in next.values() {
            for path in manager.project_paths() {
                if !roots.contains(&path) {
                    roots.push(path);
                }
            }
        }

        let excluded = self.ports.settings.excluded_paths();
        let manifests = self.ports.discovery.find_manifest_dirs(&roots, &excluded)?;

        let discovered = manifests
            .npm
            .iter()
            .map(|dir| (Ecosystem::Npm, dir))
            .chain(manifests.go.iter().map(|dir| (Ecosystem::Go, dir)));
        for (kind, dir) in discovered {
            let key = ProjectKey::for_directory(dir);
            if let Some(existing) = next.get(&key) {
                debug!(
                    project = %key,
                    kept = %existing.ecosystem(),
                    skipped = %kind,
                    "Project already registered in this refresh"
                );
                continue;
            }
            let manager = self.reuse_or_create(&previous, kind, key.clone(), dir);
            next.insert(key, manager);
        }

        info!(managers = next.len(), "Scan managers refreshed");
        *self.managers.write().unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    fn reuse_or_create(
        &self,
        previous: &BTreeMap<ProjectKey, Arc<ScanManager>>,
        kind: Ecosystem,
        key: ProjectKey,
        directory: &Path,
    ) -> Arc<ScanManager> {
        match previous.get(&key) {
            Some(manager) if manager.ecosystem() == kind => Arc::clone(manager),
            _ => self.factory.create(kind, key, directory),
        }
    }

    /// Starts a scan of every project.
    ///
    /// Refused (and reported) while the workspace is indexing, while any
    /// manager is still scanning, or when no scan server is configured.
    /// Otherwise refreshes the registry, publishes `ScanReset` and starts
    /// every manager on its own task. Must be called from within a tokio
    /// runtime. The refresh walks the filesystem, so async callers should
    /// run this through `tokio::task::spawn_blocking`.
    ///
    /// # Errors
    /// Returns an error when the registry refresh fails
    pub fn start_scan(
        &self,
        quick_scan: bool,
        extra_deps: Option<Vec<LibraryDependency>>,
    ) -> Result<ScanDispatch> {
        let _dispatch = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);

        if self.ports.workspace.is_indexing() {
            info!("Workspace is indexing, scan request dropped");
            self.ports
                .reporter
                .report("⏳ Workspace is still indexing; scan skipped");
            return Ok(ScanDispatch::Skipped(SkipReason::Indexing));
        }

        if self.is_scan_in_progress() {
            info!("Previous scan still running, scan request dropped");
            self.ports
                .reporter
                .report("⏳ Previous scan still running");
            return Ok(ScanDispatch::Skipped(SkipReason::ScanInProgress));
        }

        if !self.ports.settings.are_credentials_set() {
            warn!("Scan requested without a configured scan server");
            self.ports
                .reporter
                .report_error(&format!("❌ {}", ScanError::CredentialsNotConfigured));
            return Ok(ScanDispatch::Skipped(SkipReason::CredentialsNotConfigured));
        }

        self.refresh_scan_managers()?;
        self.ports.publisher.publish(ScanEvent::ScanReset);

        let extra_deps: Option<Arc<[LibraryDependency]>> = extra_deps.map(Arc::from);
        let managers = self.read_registry().clone();
        self.ports.reporter.report(&format!(
            "🔍 Scanning {} project(s)...",
            managers.len()
        ));

        let handles = managers
            .into_iter()
            .filter_map(|(key, manager)| {
                manager
                    .scan_async(quick_scan, extra_deps.clone())
                    .map(|handle| (key, handle))
            })
            .collect();
        Ok(ScanDispatch::Started(handles))
    }

    /// Quick-scans one project, or every project when `key` is unknown
    ///
    /// # Errors
    /// Returns an error when a full refresh is needed and fails
    pub fn try_scan_single_project(
        &self,
        key: &ProjectKey,
        extra_deps: Option<Vec<LibraryDependency>>,
    ) -> Result<ScanDispatch> {
        let Some(manager) = self.manager(key) else {
            return self.start_scan(true, extra_deps);
        };

        let extra_deps: Option<Arc<[LibraryDependency]>> = extra_deps.map(Arc::from);
        Ok(match manager.scan_async(true, extra_deps) {
            Some(handle) => ScanDispatch::Started(vec![(key.clone(), handle)]),
            None => ScanDispatch::Skipped(SkipReason::ScanInProgress),
        })
    }

    /// Directories scanned by every registered manager
    pub fn project_paths(&self) -> Vec<PathBuf> {
        self.scan_managers()
            .iter()
            .flat_map(|manager| manager.project_paths())
            .collect()
    }
}

impl CanonicalTreeSource for ScanOrchestrator {
    fn project_keys(&self) -> Vec<ProjectKey> {
        self.read_registry().keys().cloned().collect()
    }

    fn canonical_tree(&self, key: &ProjectKey) -> Option<Arc<DependencyNode>> {
        ScanOrchestrator::canonical_tree(self, key)
    }
}
