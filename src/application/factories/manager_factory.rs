use crate::application::scan_manager::{ScanDependencies, ScanManager};
use crate::dependency_tree::builders::{
    DependencyTreeBuilder, GoTreeBuilder, GradleTreeBuilder, MavenTreeBuilder, NpmTreeBuilder,
};
use crate::dependency_tree::domain::{Ecosystem, ProjectKey};
use crate::ports::outbound::{PackageManagerClient, WorkspaceIntrospection};
use crate::shared::Result;
use std::path::Path;
use std::sync::Arc;

/// Factory for creating scan managers
///
/// Encapsulates which tree builder backs which ecosystem. The match over
/// `Ecosystem` is exhaustive, so there is no "unknown manager type" at
/// runtime; an unknown type name fails in `create_by_name`.
pub struct ManagerFactory {
    workspace: Arc<dyn WorkspaceIntrospection>,
    package_managers: Arc<dyn PackageManagerClient>,
    deps: ScanDependencies,
}

impl ManagerFactory {
    pub fn new(
        workspace: Arc<dyn WorkspaceIntrospection>,
        package_managers: Arc<dyn PackageManagerClient>,
        deps: ScanDependencies,
    ) -> Self {
        Self {
            workspace,
            package_managers,
            deps,
        }
    }

    /// Creates the manager for `kind`.
    ///
    /// # Arguments
    /// * `kind` - Ecosystem of the new manager
    /// * `key` - Project identity the manager is registered under
    /// * `directory` - Manifest directory (npm and Go only; ignored otherwise)
    pub fn create(&self, kind: Ecosystem, key: ProjectKey, directory: &Path) -> Arc<ScanManager> {
        let builder: Box<dyn DependencyTreeBuilder> = match kind {
            Ecosystem::Maven => Box::new(MavenTreeBuilder::new(Arc::clone(&self.workspace))),
            Ecosystem::Gradle => Box::new(GradleTreeBuilder::new(Arc::clone(&self.workspace))),
            Ecosystem::Npm => Box::new(NpmTreeBuilder::new(
                directory.to_path_buf(),
                Arc::clone(&self.package_managers),
            )),
            Ecosystem::Go => Box::new(GoTreeBuilder::new(
                directory.to_path_buf(),
                Arc::clone(&self.package_managers),
            )),
        };
        Arc::new(ScanManager::new(key, builder, self.deps.clone()))
    }

    /// Creates a manager from a type name such as `"npm"`
    ///
    /// # Errors
    /// Returns an error for an unknown type name
    pub fn create_by_name(&self, kind: &str, key: ProjectKey, directory: &Path) -> Result<Arc<ScanManager>> {
        let kind: Ecosystem = kind.parse()?;
        Ok(self.create(kind, key, directory))
    }
}
