//! Per-ecosystem dependency tree builders.
//!
//! Every ecosystem has its own node identity and deduplication rules, so
//! each gets its own builder behind the common `DependencyTreeBuilder`
//! capability. The orchestrator only sees the trait.

mod go;
mod gradle;
mod maven;
mod npm;

pub use go::GoTreeBuilder;
pub use gradle::GradleTreeBuilder;
pub use maven::MavenTreeBuilder;
pub use npm::NpmTreeBuilder;

use crate::dependency_tree::domain::{DependencyNode, Ecosystem, GeneralInfo};
use crate::ports::outbound::{LibraryDependency, NativeDependency};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;

/// Maximum tree depth followed when expanding native graphs
pub(crate) const MAX_TREE_DEPTH: usize = 100;

/// Builds the canonical dependency tree of one logical project
#[async_trait]
pub trait DependencyTreeBuilder: Send + Sync {
    fn ecosystem(&self) -> Ecosystem;

    /// Directories owned by this project; manifest discovery starts from them
    fn project_paths(&self) -> Vec<PathBuf>;

    /// Builds a fresh tree.
    ///
    /// # Arguments
    /// * `extra_deps` - Library dependencies from the latest build-tool import,
    ///   used by builders that can take them (Gradle)
    ///
    /// # Errors
    /// Returns an error when the native graph cannot be obtained
    async fn build_tree(&self, extra_deps: Option<&[LibraryDependency]>) -> Result<DependencyNode>;
}

/// Module/library dependency attachment shared by Maven and Gradle.
///
/// Known workspace modules are never attached as leaves; they appear
/// structurally. `added` decides whether a library is attached again.
pub(crate) fn attach_library(
    parent: &mut DependencyNode,
    dependency: &NativeDependency,
    ecosystem: Ecosystem,
    project_ids: &HashSet<String>,
    added: &mut HashSet<String>,
) {
    let display = dependency.id.display_string();
    if project_ids.contains(&display) || !added.insert(display.clone()) {
        return;
    }

    let info = GeneralInfo::new(&dependency.id.artifact, &dependency.id.version, ecosystem)
        .with_optional_group(dependency.id.group.clone());
    let mut node =
        DependencyNode::dependency(display, info).with_scopes(dependency.scopes.iter().cloned());

    for child in &dependency.dependencies {
        attach_library(&mut node, child, ecosystem, project_ids, added);
    }
    parent.add(node);
}

/// Collapses a synthetic root holding a single child into that child.
/// Only the top level is collapsed.
pub(crate) fn collapse_single_child_root(root: DependencyNode) -> DependencyNode {
    match root.into_single_child() {
        Ok(child) => child,
        Err(root) => root,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dependency_tree::domain::Ecosystem;
    use crate::ports::outbound::{NativeDependency, NativeModule, WorkspaceIntrospection};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    /// In-memory workspace model for builder tests
    #[derive(Default)]
    pub struct StubWorkspace {
        pub modules: Vec<(Ecosystem, NativeModule)>,
        pub graphs: HashMap<PathBuf, Vec<NativeDependency>>,
    }

    impl StubWorkspace {
        pub fn with_module(
            mut self,
            ecosystem: Ecosystem,
            module: NativeModule,
            dependencies: Vec<NativeDependency>,
        ) -> Self {
            self.graphs.insert(module.manifest_path.clone(), dependencies);
            self.modules.push((ecosystem, module));
            self
        }
    }

    impl WorkspaceIntrospection for StubWorkspace {
        fn project_name(&self) -> String {
            "workspace".to_string()
        }

        fn base_path(&self) -> PathBuf {
            PathBuf::from("/ws")
        }

        fn is_indexing(&self) -> bool {
            false
        }

        fn list_modules(&self, build_system: Ecosystem) -> Vec<NativeModule> {
            self.modules
                .iter()
                .filter(|(e, _)| *e == build_system)
                .map(|(_, m)| m.clone())
                .collect()
        }

        fn root_modules(&self, build_system: Ecosystem) -> Vec<NativeModule> {
            let modules = self.list_modules(build_system);
            modules
                .iter()
                .filter(|m| {
                    !modules
                        .iter()
                        .any(|other| other.submodules.contains(&m.manifest_path))
                })
                .cloned()
                .collect()
        }

        fn dependency_graph_of(&self, module: &NativeModule) -> Vec<NativeDependency> {
            self.graphs
                .get(&module.manifest_path)
                .cloned()
                .unwrap_or_default()
        }

        fn resolve_manifest_path(&self, manifest_path: &Path) -> Option<NativeModule> {
            self.modules
                .iter()
                .find(|(_, m)| m.manifest_path == manifest_path)
                .map(|(_, m)| m.clone())
        }
    }
}
