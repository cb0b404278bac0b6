use super::{DependencyTreeBuilder, MAX_TREE_DEPTH};
use crate::dependency_tree::domain::{DependencyNode, Ecosystem, GeneralInfo};
use crate::ports::outbound::{GoModuleGraph, LibraryDependency, PackageManagerClient};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Builds the tree of one Go module directory from `go mod graph`.
///
/// Node identity is `path:version`. The first occurrence of a module
/// version is expanded; later occurrences are leaves. A module already on
/// the current path is not attached again.
pub struct GoTreeBuilder {
    directory: PathBuf,
    client: Arc<dyn PackageManagerClient>,
}

struct Expansion<'a> {
    edges: HashMap<&'a str, Vec<&'a str>>,
    expanded: HashSet<&'a str>,
    ancestors: HashSet<&'a str>,
}

impl GoTreeBuilder {
    pub fn new(directory: PathBuf, client: Arc<dyn PackageManagerClient>) -> Self {
        Self { directory, client }
    }

    pub fn is_applicable(directory: &Path) -> bool {
        directory.join("go.mod").is_file()
    }

    fn build(&self, graph: &GoModuleGraph) -> DependencyNode {
        let info = GeneralInfo::new(&graph.main, "", Ecosystem::Go).with_path(&self.directory);
        let mut root = DependencyNode::root(&graph.main, info);

        let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
        for (from, to) in &graph.edges {
            edges.entry(from.as_str()).or_default().push(to.as_str());
        }

        let mut expansion = Expansion {
            edges,
            expanded: HashSet::new(),
            ancestors: HashSet::from([graph.main.as_str()]),
        };
        Self::expand(&mut root, &graph.main, &mut expansion, 0);
        root
    }

    fn expand<'a>(parent: &mut DependencyNode, from: &'a str, state: &mut Expansion<'a>, depth: usize) {
        if depth >= MAX_TREE_DEPTH {
            warn!(module = from, max_depth = MAX_TREE_DEPTH, "go module chain truncated");
            return;
        }

        let children = match state.edges.get(from) {
            Some(children) => children.clone(),
            None => return,
        };

        for module in children {
            if state.ancestors.contains(module) {
                continue;
            }
            let (path, version) = split_module_version(module);
            let info = GeneralInfo::new(path, version, Ecosystem::Go);
            let mut node = DependencyNode::dependency(format!("{}:{}", path, version), info);

            if state.expanded.insert(module) {
                state.ancestors.insert(module);
                Self::expand(&mut node, module, state, depth + 1);
                state.ancestors.remove(module);
            }
            parent.add(node);
        }
    }
}

/// Splits `path@version`; the main module has no version
fn split_module_version(module: &str) -> (&str, &str) {
    module.rsplit_once('@').unwrap_or((module, ""))
}

#[async_trait]
impl DependencyTreeBuilder for GoTreeBuilder {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    fn project_paths(&self) -> Vec<PathBuf> {
        vec![self.directory.clone()]
    }

    async fn build_tree(&self, _extra_deps: Option<&[LibraryDependency]>) -> Result<DependencyNode> {
        let graph = self.client.go_module_graph(&self.directory).await?;
        Ok(self.build(&graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::NpmPackageTree;

    struct FixedGoClient {
        graph: GoModuleGraph,
    }

    #[async_trait]
    impl PackageManagerClient for FixedGoClient {
        async fn npm_dependency_tree(&self, _directory: &Path) -> Result<NpmPackageTree> {
            anyhow::bail!("not an npm package")
        }

        async fn go_module_graph(&self, _directory: &Path) -> Result<GoModuleGraph> {
            Ok(self.graph.clone())
        }
    }

    async fn build(output: &str) -> DependencyNode {
        let graph = GoModuleGraph::parse("example.com/app", output);
        GoTreeBuilder::new(PathBuf::from("/ws/svc"), Arc::new(FixedGoClient { graph }))
            .build_tree(None)
            .await
            .unwrap()
    }

    #[test]
    fn test_split_module_version() {
        assert_eq!(
            split_module_version("golang.org/x/text@v0.3.7"),
            ("golang.org/x/text", "v0.3.7")
        );
        assert_eq!(split_module_version("example.com/app"), ("example.com/app", ""));
    }

    #[tokio::test]
    async fn test_first_occurrence_expanded_later_ones_are_leaves() {
        let tree = build(
            "example.com/app a.io/x@v1.0.0\n\
             example.com/app b.io/y@v2.0.0\n\
             a.io/x@v1.0.0 c.io/z@v0.1.0\n\
             b.io/y@v2.0.0 a.io/x@v1.0.0\n",
        )
        .await;

        assert_eq!(tree.name(), "example.com/app");
        assert_eq!(tree.general_info().path(), Some(Path::new("/ws/svc")));

        let x = tree.child("a.io/x:v1.0.0").unwrap();
        assert_eq!(x.children().len(), 1);
        assert_eq!(x.children()[0].name(), "c.io/z:v0.1.0");

        let y = tree.child("b.io/y:v2.0.0").unwrap();
        let x_again = y.child("a.io/x:v1.0.0").unwrap();
        assert!(x_again.children().is_empty());
    }

    #[tokio::test]
    async fn test_cycles_stop_at_ancestors() {
        let tree = build(
            "example.com/app a.io/x@v1.0.0\n\
             a.io/x@v1.0.0 b.io/y@v1.0.0\n\
             b.io/y@v1.0.0 a.io/x@v1.0.0\n\
             b.io/y@v1.0.0 example.com/app\n",
        )
        .await;

        assert_eq!(tree.node_count(), 3);
        let y = &tree.children()[0].children()[0];
        assert_eq!(y.name(), "b.io/y:v1.0.0");
        assert!(y.children().is_empty());
    }

    #[tokio::test]
    async fn test_versions_are_distinct_identities() {
        let tree = build(
            "example.com/app a.io/x@v1.0.0\n\
             example.com/app a.io/x@v1.1.0\n",
        )
        .await;
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[1].general_info().version(), "v1.1.0");
    }
}
