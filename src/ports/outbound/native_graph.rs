//! Native dependency graphs as reported by the host workspace model and
//! by package-manager tooling, before they are turned into trees.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Maven-style coordinates of a module or library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub group: Option<String>,
    pub artifact: String,
    pub version: String,
}

impl Coordinates {
    pub fn new(group: Option<&str>, artifact: &str, version: &str) -> Self {
        Self {
            group: group.map(str::to_string),
            artifact: artifact.to_string(),
            version: version.to_string(),
        }
    }

    /// `group:artifact:version`, or `artifact:version` when there is no group
    pub fn display_string(&self) -> String {
        match &self.group {
            Some(group) if !group.is_empty() => {
                format!("{}:{}:{}", group, self.artifact, self.version)
            }
            _ => format!("{}:{}", self.artifact, self.version),
        }
    }
}

/// A module (Maven project or Gradle module) of the workspace model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeModule {
    pub id: Coordinates,
    pub directory: PathBuf,
    pub manifest_path: PathBuf,
    /// Manifest paths of declared sub-modules, unresolved
    pub submodules: Vec<PathBuf>,
}

/// One edge target in a module's resolved dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NativeDependency {
    pub id: Coordinates,
    #[serde(default)]
    pub scopes: BTreeSet<String>,
    #[serde(default)]
    pub dependencies: Vec<NativeDependency>,
}

impl NativeDependency {
    pub fn new(id: Coordinates) -> Self {
        Self {
            id,
            scopes: BTreeSet::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scopes.insert(scope.to_string());
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<NativeDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// Library dependency produced by the latest Gradle import, keyed by the
/// name of the module that owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDependency {
    pub module: String,
    pub dependency: NativeDependency,
}

/// Resolved `npm ls` tree of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NpmPackageTree {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: Vec<NpmDependency>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmDependency {
    pub name: String,
    pub version: String,
    /// Only meaningful on direct dependencies
    pub dev: bool,
    pub dependencies: Vec<NpmDependency>,
}

impl NpmDependency {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            dev: false,
            dependencies: Vec::new(),
        }
    }

    pub fn dev(mut self) -> Self {
        self.dev = true;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<NpmDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// `go mod graph` output of one module directory.
///
/// Nodes are written `path@version`; the main module has no version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoModuleGraph {
    pub main: String,
    pub edges: Vec<(String, String)>,
}

impl GoModuleGraph {
    /// Parses the line-oriented `go mod graph` format
    pub fn parse(main: &str, graph_output: &str) -> Self {
        let edges = graph_output
            .lines()
            .filter_map(|line| {
                let mut parts = line.split_whitespace();
                Some((parts.next()?.to_string(), parts.next()?.to_string()))
            })
            .collect();
        Self {
            main: main.trim().to_string(),
            edges,
        }
    }
}
