use super::{attach_library, collapse_single_child_root, DependencyTreeBuilder};
use crate::dependency_tree::domain::{DependencyNode, Ecosystem, GeneralInfo};
use crate::ports::outbound::{LibraryDependency, NativeModule, WorkspaceIntrospection};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Builds the workspace tree from the host's Maven project model.
///
/// Modules are shown structurally (root modules, then their declared
/// sub-modules). Libraries are deduplicated across the whole pass: a
/// library reached through a module or another library is not attached
/// a second time anywhere else in the tree.
pub struct MavenTreeBuilder {
    workspace: Arc<dyn WorkspaceIntrospection>,
}

/// State of one build pass
struct BuildPass {
    project_ids: HashSet<String>,
    added: HashSet<String>,
    modules_seen: HashSet<PathBuf>,
}

impl MavenTreeBuilder {
    pub fn new(workspace: Arc<dyn WorkspaceIntrospection>) -> Self {
        Self { workspace }
    }

    pub fn is_applicable(workspace: &dyn WorkspaceIntrospection) -> bool {
        !workspace.list_modules(Ecosystem::Maven).is_empty()
    }

    fn build(&self) -> DependencyNode {
        let project_name = self.workspace.project_name();
        let info = GeneralInfo::new(&project_name, "", Ecosystem::Maven)
            .with_path(self.workspace.base_path());
        let mut root = DependencyNode::root(project_name, info);

        let mut pass = BuildPass {
            project_ids: self
                .workspace
                .list_modules(Ecosystem::Maven)
                .iter()
                .map(|m| m.id.display_string())
                .collect(),
            added: HashSet::new(),
            modules_seen: HashSet::new(),
        };

        for module in self.workspace.root_modules(Ecosystem::Maven) {
            self.populate_module(&mut root, &module, &mut pass);
        }

        collapse_single_child_root(root)
    }

    fn populate_module(&self, parent: &mut DependencyNode, module: &NativeModule, pass: &mut BuildPass) {
        if !pass.modules_seen.insert(module.manifest_path.clone()) {
            return;
        }

        let info = GeneralInfo::new(&module.id.artifact, &module.id.version, Ecosystem::Maven)
            .with_optional_group(module.id.group.clone())
            .with_path(&module.directory);
        let mut node = DependencyNode::module(&module.id.artifact, info);

        for dependency in self.workspace.dependency_graph_of(module) {
            attach_library(
                &mut node,
                &dependency,
                Ecosystem::Maven,
                &pass.project_ids,
                &mut pass.added,
            );
        }

        for manifest in &module.submodules {
            // Sub-modules the model cannot resolve are skipped
            if let Some(submodule) = self.workspace.resolve_manifest_path(manifest) {
                self.populate_module(&mut node, &submodule, pass);
            }
        }

        parent.add(node);
    }
}

#[async_trait]
impl DependencyTreeBuilder for MavenTreeBuilder {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    fn project_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .workspace
            .list_modules(Ecosystem::Maven)
            .into_iter()
            .map(|m| m.directory)
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }

    async fn build_tree(&self, _extra_deps: Option<&[LibraryDependency]>) -> Result<DependencyNode> {
        Ok(self.build())
    }
}
