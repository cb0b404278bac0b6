use super::{attach_library, collapse_single_child_root, DependencyTreeBuilder};
use crate::dependency_tree::domain::{DependencyNode, Ecosystem, GeneralInfo};
use crate::ports::outbound::{
    LibraryDependency, NativeDependency, NativeModule, WorkspaceIntrospection,
};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Builds the workspace tree from Gradle modules.
///
/// Each Gradle module resolves its own classpath, so libraries are
/// deduplicated per module rather than across the whole pass.
pub struct GradleTreeBuilder {
    workspace: Arc<dyn WorkspaceIntrospection>,
}

impl GradleTreeBuilder {
    pub fn new(workspace: Arc<dyn WorkspaceIntrospection>) -> Self {
        Self { workspace }
    }

    pub fn is_applicable(workspace: &dyn WorkspaceIntrospection) -> bool {
        !workspace.list_modules(Ecosystem::Gradle).is_empty()
    }

    fn build(&self, extra_deps: Option<&[LibraryDependency]>) -> DependencyNode {
        let project_name = self.workspace.project_name();
        let info = GeneralInfo::new(&project_name, "", Ecosystem::Gradle)
            .with_path(self.workspace.base_path());
        let mut root = DependencyNode::root(project_name, info);

        let modules = self.workspace.list_modules(Ecosystem::Gradle);
        let project_ids: HashSet<String> =
            modules.iter().map(|m| m.id.display_string()).collect();

        for module in &modules {
            let info = GeneralInfo::new(&module.id.artifact, &module.id.version, Ecosystem::Gradle)
                .with_optional_group(module.id.group.clone())
                .with_path(&module.directory);
            let mut node = DependencyNode::module(&module.id.artifact, info);
            let mut added = HashSet::new();

            for dependency in self.module_dependencies(module, extra_deps) {
                attach_library(
                    &mut node,
                    &dependency,
                    Ecosystem::Gradle,
                    &project_ids,
                    &mut added,
                );
            }
            root.add(node);
        }

        collapse_single_child_root(root)
    }

    /// Library dependencies of the latest import when given, otherwise the
    /// workspace model's graph
    fn module_dependencies(
        &self,
        module: &NativeModule,
        extra_deps: Option<&[LibraryDependency]>,
    ) -> Vec<NativeDependency> {
        match extra_deps {
            Some(libraries) => libraries
                .iter()
                .filter(|lib| lib.module == module.id.artifact)
                .map(|lib| lib.dependency.clone())
                .collect(),
            None => self.workspace.dependency_graph_of(module),
        }
    }
}

#[async_trait]
impl DependencyTreeBuilder for GradleTreeBuilder {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Gradle
    }

    fn project_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .workspace
            .list_modules(Ecosystem::Gradle)
            .into_iter()
            .map(|m| m.directory)
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }

    async fn build_tree(&self, extra_deps: Option<&[LibraryDependency]>) -> Result<DependencyNode> {
        Ok(self.build(extra_deps))
    }
}
