use async_trait::async_trait;
use polyscan::ports::outbound::{GoModuleGraph, NpmPackageTree};
use polyscan::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock PackageManagerClient serving fixed native graphs per directory
#[derive(Default)]
pub struct MockPackageManagerClient {
    npm: HashMap<PathBuf, NpmPackageTree>,
    go: HashMap<PathBuf, GoModuleGraph>,
}

impl MockPackageManagerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_npm(mut self, dir: &str, tree: NpmPackageTree) -> Self {
        self.npm.insert(PathBuf::from(dir), tree);
        self
    }

    pub fn with_go(mut self, dir: &str, main: &str, graph: &str) -> Self {
        self.go.insert(PathBuf::from(dir), GoModuleGraph::parse(main, graph));
        self
    }
}

#[async_trait]
impl PackageManagerClient for MockPackageManagerClient {
    async fn npm_dependency_tree(&self, directory: &Path) -> Result<NpmPackageTree> {
        self.npm
            .get(directory)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("npm ls failed in {}", directory.display()))
    }

    async fn go_module_graph(&self, directory: &Path) -> Result<GoModuleGraph> {
        self.go
            .get(directory)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("go mod graph failed in {}", directory.display()))
    }
}
