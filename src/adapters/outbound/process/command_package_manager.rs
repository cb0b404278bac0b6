use crate::ports::outbound::{GoModuleGraph, NpmDependency, NpmPackageTree, PackageManagerClient};
use crate::shared::error::ScanError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Upper bound for one package-manager invocation
const COMMAND_TIMEOUT_SECS: u64 = 300;

/// CommandPackageManagerClient adapter running the ecosystem tools
///
/// - npm: `npm ls --all --json`, with direct dev dependencies taken from
///   the `devDependencies` of `package.json`
/// - Go: `go list -m` for the main module, `go mod graph` for the edges
pub struct CommandPackageManagerClient {
    npm: String,
    go: String,
    timeout: Duration,
}

impl CommandPackageManagerClient {
    pub fn new() -> Self {
        Self::with_executables("npm", "go")
    }

    pub fn with_executables(npm: impl Into<String>, go: impl Into<String>) -> Self {
        Self {
            npm: npm.into(),
            go: go.into(),
            timeout: Duration::from_secs(COMMAND_TIMEOUT_SECS),
        }
    }

    /// Runs a command in `directory` and returns its raw output.
    /// A non-zero exit status is left to the caller.
    async fn run(&self, program: &str, args: &[&str], directory: &Path, hint: &str) -> Result<Output> {
        let command_line = format!("{} {}", program, args.join(" "));
        let failed = |details: String| ScanError::CommandFailed {
            command: command_line.clone(),
            directory: directory.to_path_buf(),
            details,
            hint: hint.to_string(),
        };

        debug!(command = %command_line, directory = %directory.display(), "Running package manager");
        let child = Command::new(program)
            .args(args)
            .current_dir(directory)
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(failed(e.to_string()).into()),
            Err(_) => Err(failed(format!("timed out after {} seconds", self.timeout.as_secs())).into()),
        }
    }

    fn require_success(output: &Output, command: &str, directory: &Path, hint: &str) -> Result<String> {
        if !output.status.success() {
            return Err(ScanError::CommandFailed {
                command: command.to_string(),
                directory: directory.to_path_buf(),
                details: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                hint: hint.to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for CommandPackageManagerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageManagerClient for CommandPackageManagerClient {
    #[instrument(skip_all, fields(directory = %directory.display()))]
    async fn npm_dependency_tree(&self, directory: &Path) -> Result<NpmPackageTree> {
        const HINT: &str = "Make sure npm is installed and run `npm install` in this directory";

        let manifest = read_regular_file(&directory.join("package.json"), "package.json")?;
        let dev_names = dev_dependency_names(&manifest).map_err(|e| ScanError::FileReadError {
            path: directory.join("package.json"),
            details: e.to_string(),
        })?;

        // npm ls exits non-zero for extraneous or missing packages but
        // still prints the resolved tree, so stdout is parsed regardless
        let output = self.run(&self.npm, &["ls", "--all", "--json"], directory, HINT).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_npm_ls(&stdout, &dev_names).map_err(|e| {
            ScanError::CommandFailed {
                command: format!("{} ls --all --json", self.npm),
                directory: directory.to_path_buf(),
                details: format!(
                    "{} ({})",
                    e,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
                hint: HINT.to_string(),
            }
            .into()
        })
    }

    #[instrument(skip_all, fields(directory = %directory.display()))]
    async fn go_module_graph(&self, directory: &Path) -> Result<GoModuleGraph> {
        const HINT: &str = "Make sure go is installed and run `go mod download` in this directory";

        let output = self.run(&self.go, &["list", "-m"], directory, HINT).await?;
        let main = Self::require_success(&output, &format!("{} list -m", self.go), directory, HINT)?;
        // Workspaces list several main modules; the first is this directory's
        let main = main.lines().next().unwrap_or_default().to_string();

        let output = self.run(&self.go, &["mod", "graph"], directory, HINT).await?;
        let graph = Self::require_success(&output, &format!("{} mod graph", self.go), directory, HINT)?;

        Ok(GoModuleGraph::parse(&main, &graph))
    }
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

fn dev_dependency_names(manifest: &str) -> std::result::Result<HashSet<String>, serde_json::Error> {
    let manifest: PackageManifest = serde_json::from_str(manifest)?;
    Ok(manifest.dev_dependencies.into_keys().collect())
}

#[derive(Debug, Deserialize)]
struct NpmLsNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, NpmLsNode>,
}

/// Converts `npm ls --all --json` output into a package tree.
/// Entries without a resolved version (missing packages) are dropped.
fn parse_npm_ls(output: &str, dev_names: &HashSet<String>) -> std::result::Result<NpmPackageTree, serde_json::Error> {
    let root: NpmLsNode = serde_json::from_str(output)?;
    let dependencies = root
        .dependencies
        .into_iter()
        .filter_map(|(name, node)| {
            let mut dependency = convert_node(name, node)?;
            dependency.dev = dev_names.contains(&dependency.name);
            Some(dependency)
        })
        .collect();

    Ok(NpmPackageTree {
        name: root.name,
        version: root.version,
        dependencies,
    })
}

fn convert_node(name: String, node: NpmLsNode) -> Option<NpmDependency> {
    let version = node.version?;
    let dependencies = node
        .dependencies
        .into_iter()
        .filter_map(|(child_name, child)| convert_node(child_name, child))
        .collect();
    Some(NpmDependency {
        name,
        version,
        dev: false,
        dependencies,
    })
}
