use crate::shared::Result;
use std::path::PathBuf;

/// Directories containing package manifests, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDirs {
    /// Directories holding a `package.json`
    pub npm: Vec<PathBuf>,
    /// Directories holding a `go.mod`
    pub go: Vec<PathBuf>,
}

/// ManifestDiscovery port for locating package manifests on disk
pub trait ManifestDiscovery: Send + Sync {
    /// Walks every root and collects the directories holding manifests.
    ///
    /// # Arguments
    /// * `roots` - Directories to search
    /// * `excluded_paths` - Wildcard patterns; matching directories are not descended into
    ///
    /// # Errors
    /// Returns an error when a root cannot be walked at all
    fn find_manifest_dirs(&self, roots: &[PathBuf], excluded_paths: &[String])
        -> Result<ManifestDirs>;
}
