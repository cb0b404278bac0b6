use super::{DependencyTreeBuilder, MAX_TREE_DEPTH};
use crate::dependency_tree::domain::{DependencyNode, Ecosystem, GeneralInfo};
use crate::ports::outbound::{LibraryDependency, NpmDependency, PackageManagerClient};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

const PROD_SCOPE: &str = "prod";
const DEV_SCOPE: &str = "dev";

/// Builds the tree of one npm package directory from `npm ls`.
///
/// Node identity is `name:version`. Transitive packages inherit the scope
/// of the direct dependency that pulled them in.
pub struct NpmTreeBuilder {
    directory: PathBuf,
    client: Arc<dyn PackageManagerClient>,
}

impl NpmTreeBuilder {
    pub fn new(directory: PathBuf, client: Arc<dyn PackageManagerClient>) -> Self {
        Self { directory, client }
    }

    pub fn is_applicable(directory: &Path) -> bool {
        directory.join("package.json").is_file()
    }

    fn attach(parent: &mut DependencyNode, dependency: &NpmDependency, scope: &str, depth: usize) {
        if depth >= MAX_TREE_DEPTH {
            warn!(
                package = %dependency.name,
                max_depth = MAX_TREE_DEPTH,
                "npm dependency chain truncated"
            );
            return;
        }

        let info = GeneralInfo::new(&dependency.name, &dependency.version, Ecosystem::Npm);
        let mut node = DependencyNode::dependency(
            format!("{}:{}", dependency.name, dependency.version),
            info,
        )
        .with_scopes([scope]);

        for child in &dependency.dependencies {
            Self::attach(&mut node, child, scope, depth + 1);
        }
        parent.add(node);
    }
}

#[async_trait]
impl DependencyTreeBuilder for NpmTreeBuilder {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn project_paths(&self) -> Vec<PathBuf> {
        vec![self.directory.clone()]
    }

    async fn build_tree(&self, _extra_deps: Option<&[LibraryDependency]>) -> Result<DependencyNode> {
        let tree = self.client.npm_dependency_tree(&self.directory).await?;

        let name = tree.name.clone().unwrap_or_else(|| {
            self.directory
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.directory.display().to_string())
        });
        let version = tree.version.clone().unwrap_or_default();
        let display = if version.is_empty() {
            name.clone()
        } else {
            format!("{}:{}", name, version)
        };

        let info = GeneralInfo::new(name, version, Ecosystem::Npm).with_path(&self.directory);
        let mut root = DependencyNode::root(display, info);

        for direct in &tree.dependencies {
            let scope = if direct.dev { DEV_SCOPE } else { PROD_SCOPE };
            Self::attach(&mut root, direct, scope, 0);
        }
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{GoModuleGraph, NpmPackageTree};
    use tempfile::TempDir;

    struct FixedNpmClient {
        tree: NpmPackageTree,
    }

    #[async_trait]
    impl PackageManagerClient for FixedNpmClient {
        async fn npm_dependency_tree(&self, _directory: &Path) -> Result<NpmPackageTree> {
            Ok(self.tree.clone())
        }

        async fn go_module_graph(&self, _directory: &Path) -> Result<GoModuleGraph> {
            anyhow::bail!("not a go module")
        }
    }

    fn builder(tree: NpmPackageTree) -> NpmTreeBuilder {
        NpmTreeBuilder::new(PathBuf::from("/ws/web"), Arc::new(FixedNpmClient { tree }))
    }

    #[tokio::test]
    async fn test_scopes_are_inherited_from_direct_dependency() {
        let tree = NpmPackageTree {
            name: Some("web".to_string()),
            version: Some("1.0.0".to_string()),
            dependencies: vec![
                NpmDependency::new("react", "18.2.0")
                    .with_dependencies(vec![NpmDependency::new("loose-envify", "1.4.0")]),
                NpmDependency::new("jest", "29.0.0")
                    .dev()
                    .with_dependencies(vec![NpmDependency::new("chalk", "4.1.2")]),
            ],
        };

        let root = builder(tree).build_tree(None).await.unwrap();

        assert_eq!(root.name(), "web:1.0.0");
        assert_eq!(root.general_info().path(), Some(Path::new("/ws/web")));

        let react = root.child("react:18.2.0").unwrap();
        assert!(react.scopes().contains("prod"));
        assert!(react.children()[0].scopes().contains("prod"));

        let jest = root.child("jest:29.0.0").unwrap();
        assert!(jest.scopes().contains("dev"));
        assert!(jest.child("chalk:4.1.2").unwrap().scopes().contains("dev"));
    }

    #[tokio::test]
    async fn test_siblings_deduplicated_by_name_and_version() {
        let tree = NpmPackageTree {
            name: Some("web".to_string()),
            version: None,
            dependencies: vec![
                NpmDependency::new("ms", "2.1.3"),
                NpmDependency::new("ms", "2.1.3"),
                NpmDependency::new("ms", "2.0.0"),
            ],
        };

        let root = builder(tree).build_tree(None).await.unwrap();
        assert_eq!(root.name(), "web");
        assert_eq!(root.children().len(), 2);
    }

    #[tokio::test]
    async fn test_unnamed_package_uses_directory_name() {
        let root = builder(NpmPackageTree::default()).build_tree(None).await.unwrap();
        assert_eq!(root.name(), "web");
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_is_applicable() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!NpmTreeBuilder::is_applicable(temp_dir.path()));
        std::fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
        assert!(NpmTreeBuilder::is_applicable(temp_dir.path()));
    }
}
