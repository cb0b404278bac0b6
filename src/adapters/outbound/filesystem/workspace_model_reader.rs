use crate::dependency_tree::domain::Ecosystem;
use crate::ports::outbound::{Coordinates, NativeDependency, NativeModule, WorkspaceIntrospection};
use crate::shared::error::ScanError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Default file name of a workspace model export
pub const WORKSPACE_MODEL_FILE_NAME: &str = "polyscan.workspace.json";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkspaceModelFile {
    project_name: String,
    /// Relative to the model file's directory
    #[serde(default)]
    base_path: Option<PathBuf>,
    #[serde(default)]
    indexing: bool,
    #[serde(default)]
    modules: Vec<ModuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleEntry {
    build_system: Ecosystem,
    id: Coordinates,
    /// Relative to the base path
    directory: PathBuf,
    /// Relative to the base path; defaults to the build file in `directory`
    #[serde(default)]
    manifest_path: Option<PathBuf>,
    /// Sub-module manifest paths, relative to `directory`
    #[serde(default)]
    submodules: Vec<PathBuf>,
    #[serde(default)]
    dependencies: Vec<NativeDependency>,
}

/// JsonWorkspaceModel adapter: a JSON export of the host's module model
///
/// Example:
/// ```json
/// {
///   "project_name": "shop",
///   "modules": [
///     {
///       "build_system": "maven",
///       "id": { "group": "org.acme", "artifact": "app", "version": "1.0" },
///       "directory": ".",
///       "submodules": ["lib-a/pom.xml"],
///       "dependencies": [
///         { "id": { "group": "org.slf4j", "artifact": "slf4j-api", "version": "2.0.9" },
///           "scopes": ["compile"] }
///       ]
///     }
///   ]
/// }
/// ```
#[derive(Debug)]
pub struct JsonWorkspaceModel {
    project_name: String,
    base_path: PathBuf,
    indexing: bool,
    modules: Vec<(Ecosystem, NativeModule)>,
    graphs: HashMap<PathBuf, Vec<NativeDependency>>,
}

impl JsonWorkspaceModel {
    /// Loads and parses a workspace model file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read safely or is not a valid model
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_regular_file(path, "workspace model")?;
        let model_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json(&content, model_dir).map_err(|e| {
            ScanError::WorkspaceModelParse {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Parses a model; relative paths are resolved against `model_dir`
    pub fn from_json(content: &str, model_dir: &Path) -> std::result::Result<Self, serde_json::Error> {
        let file: WorkspaceModelFile = serde_json::from_str(content)?;

        let base_path = normalize(&model_dir.join(file.base_path.unwrap_or_default()));
        let mut modules = Vec::with_capacity(file.modules.len());
        let mut graphs = HashMap::new();

        for entry in file.modules {
            let directory = normalize(&base_path.join(&entry.directory));
            let manifest_path = match entry.manifest_path {
                Some(path) => normalize(&base_path.join(path)),
                None => directory.join(default_manifest_name(entry.build_system)),
            };
            let submodules = entry
                .submodules
                .iter()
                .map(|sub| normalize(&directory.join(sub)))
                .collect();

            graphs.insert(manifest_path.clone(), entry.dependencies);
            modules.push((
                entry.build_system,
                NativeModule {
                    id: entry.id,
                    directory,
                    manifest_path,
                    submodules,
                },
            ));
        }

        debug!(
            project = %file.project_name,
            modules = modules.len(),
            "Workspace model loaded"
        );
        Ok(Self {
            project_name: file.project_name,
            base_path,
            indexing: file.indexing,
            modules,
            graphs,
        })
    }
}

fn default_manifest_name(build_system: Ecosystem) -> &'static str {
    match build_system {
        Ecosystem::Maven => "pom.xml",
        Ecosystem::Gradle => "build.gradle",
        Ecosystem::Npm => "package.json",
        Ecosystem::Go => "go.mod",
    }
}

/// Lexically resolves `.` and `..` so that equal locations compare equal
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl WorkspaceIntrospection for JsonWorkspaceModel {
    fn project_name(&self) -> String {
        self.project_name.clone()
    }

    fn base_path(&self) -> PathBuf {
        self.base_path.clone()
    }

    fn is_indexing(&self) -> bool {
        self.indexing
    }

    fn list_modules(&self, build_system: Ecosystem) -> Vec<NativeModule> {
        self.modules
            .iter()
            .filter(|(kind, _)| *kind == build_system)
            .map(|(_, module)| module.clone())
            .collect()
    }

    fn root_modules(&self, build_system: Ecosystem) -> Vec<NativeModule> {
        let modules = self.list_modules(build_system);
        let nested: HashSet<&PathBuf> = modules
            .iter()
            .flat_map(|module| module.submodules.iter())
            .collect();
        modules
            .iter()
            .filter(|module| !nested.contains(&module.manifest_path))
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
        let manifest_path = normalize(manifest_path);
        self.modules
            .iter()
            .map(|(_, module)| module)
            .find(|module| module.manifest_path == manifest_path || module.directory == manifest_path)
            .cloned()
    }
}

/// Workspace without build-system modules; only manifest discovery applies
#[derive(Debug)]
pub struct EmptyWorkspace {
    project_name: String,
    base_path: PathBuf,
}

impl EmptyWorkspace {
    pub fn new(base_path: PathBuf) -> Self {
        let project_name = base_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| base_path.display().to_string());
        Self {
            project_name,
            base_path,
        }
    }
}

impl WorkspaceIntrospection for EmptyWorkspace {
    fn project_name(&self) -> String {
        self.project_name.clone()
    }

    fn base_path(&self) -> PathBuf {
        self.base_path.clone()
    }

    fn is_indexing(&self) -> bool {
        false
    }

    fn list_modules(&self, _build_system: Ecosystem) -> Vec<NativeModule> {
        Vec::new()
    }

    fn root_modules(&self, _build_system: Ecosystem) -> Vec<NativeModule> {
        Vec::new()
    }

    fn dependency_graph_of(&self, _module: &NativeModule) -> Vec<NativeDependency> {
        Vec::new()
    }

    fn resolve_manifest_path(&self, _manifest_path: &Path) -> Option<NativeModule> {
        None
    }
}
