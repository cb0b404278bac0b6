use super::native_graph::{NativeDependency, NativeModule};
use crate::dependency_tree::domain::Ecosystem;
use std::path::{Path, PathBuf};

/// WorkspaceIntrospection port for reading the host's project model
///
/// The host (an IDE, a build-tool export, ...) knows which Maven and
/// Gradle modules exist, how they nest and what each resolves to.
/// Implementations must be `Send + Sync` because builders run on
/// background tasks.
pub trait WorkspaceIntrospection: Send + Sync {
    /// Display name of the workspace project
    fn project_name(&self) -> String;

    /// Root directory of the workspace
    fn base_path(&self) -> PathBuf;

    /// Whether the host is still indexing; scans are refused meanwhile
    fn is_indexing(&self) -> bool;

    /// All modules managed by `build_system`
    fn list_modules(&self, build_system: Ecosystem) -> Vec<NativeModule>;

    /// Modules of `build_system` that are nobody's sub-module
    fn root_modules(&self, build_system: Ecosystem) -> Vec<NativeModule>;

    /// Resolved dependency graph of one module
    fn dependency_graph_of(&self, module: &NativeModule) -> Vec<NativeDependency>;

    /// Resolves a sub-module manifest path to its module.
    /// Returns `None` when the path does not belong to a known module.
    fn resolve_manifest_path(&self, manifest_path: &Path) -> Option<NativeModule>;
}
