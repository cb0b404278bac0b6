use super::native_graph::{GoModuleGraph, NpmPackageTree};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// PackageManagerClient port for querying ecosystem tooling
///
/// Abstracts the external `npm` and `go` commands that resolve the native
/// dependency graph of one directory.
#[async_trait]
pub trait PackageManagerClient: Send + Sync {
    /// Resolved dependency tree of the npm package in `directory`
    ///
    /// # Errors
    /// Returns an error if the command cannot run or its output cannot be parsed
    async fn npm_dependency_tree(&self, directory: &Path) -> Result<NpmPackageTree>;

    /// Module requirement graph of the Go module in `directory`
    ///
    /// # Errors
    /// Returns an error if the command cannot run or its output cannot be parsed
    async fn go_module_graph(&self, directory: &Path) -> Result<GoModuleGraph>;
}
