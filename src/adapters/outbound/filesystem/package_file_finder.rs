use crate::dependency_tree::services::PathFilter;
use crate::ports::outbound::{ManifestDirs, ManifestDiscovery};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const PACKAGE_JSON: &str = "package.json";
const GO_MOD: &str = "go.mod";

/// Deepest directory level searched below each root
const MAX_DISCOVERY_DEPTH: usize = 32;

/// Directories never descended into
const IGNORED_DIRECTORIES: &[&str] = &["node_modules", ".git", ".idea", ".gradle", ".hg", ".svn"];

/// PackageFileFinder adapter for manifest discovery on the local filesystem
///
/// Walks every root in file-name order so that discovery order is stable
/// between runs. A directory found under several roots is reported once.
#[derive(Debug, Default)]
pub struct PackageFileFinder;

impl PackageFileFinder {
    pub fn new() -> Self {
        Self
    }

    fn walk_root(
        root: &Path,
        filter: &PathFilter,
        dirs: &mut ManifestDirs,
        seen: &mut HashSet<(bool, PathBuf)>,
    ) -> Result<()> {
        if !root.is_dir() {
            return Err(ScanError::ManifestDiscovery {
                path: root.to_path_buf(),
                details: "Root is not a readable directory".to_string(),
            }
            .into());
        }
        if filter.is_excluded(root) {
            debug!(root = %root.display(), "Discovery root excluded");
            return Ok(());
        }

        let walker = WalkDir::new(root)
            .max_depth(MAX_DISCOVERY_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_pruned(e, filter));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::ManifestDiscovery {
                        path: root.to_path_buf(),
                        details: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry during discovery");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let is_npm = match entry.file_name().to_str() {
                Some(PACKAGE_JSON) => true,
                Some(GO_MOD) => false,
                _ => continue,
            };
            let Some(dir) = entry.path().parent() else {
                continue;
            };
            if seen.insert((is_npm, dir.to_path_buf())) {
                let target = if is_npm { &mut dirs.npm } else { &mut dirs.go };
                target.push(dir.to_path_buf());
            }
        }
        Ok(())
    }
}

fn is_pruned(entry: &DirEntry, filter: &PathFilter) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let ignored = entry
        .file_name()
        .to_str()
        .is_some_and(|name| IGNORED_DIRECTORIES.contains(&name));
    ignored || filter.is_excluded(entry.path())
}

impl ManifestDiscovery for PackageFileFinder {
    fn find_manifest_dirs(
        &self,
        roots: &[PathBuf],
        excluded_paths: &[String],
    ) -> Result<ManifestDirs> {
        let filter = PathFilter::new(excluded_paths)?;
        let mut dirs = ManifestDirs::default();
        let mut seen = HashSet::new();
        for root in roots {
            Self::walk_root(root, &filter, &mut dirs, &mut seen)?;
        }
        debug!(
            npm = dirs.npm.len(),
            go = dirs.go.len(),
            "Manifest discovery finished"
        );
        Ok(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_finds_npm_and_go_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "web/package.json");
        touch(root, "services/api/go.mod");
        touch(root, "services/api/README.md");

        let dirs = PackageFileFinder::new()
            .find_manifest_dirs(&[root.to_path_buf()], &[])
            .unwrap();

        assert_eq!(dirs.npm, vec![root.join("web")]);
        assert_eq!(dirs.go, vec![root.join("services/api")]);
    }

    #[test]
    fn test_skips_node_modules() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "package.json");
        touch(root, "node_modules/lodash/package.json");

        let dirs = PackageFileFinder::new()
            .find_manifest_dirs(&[root.to_path_buf()], &[])
            .unwrap();

        assert_eq!(dirs.npm, vec![root.to_path_buf()]);
    }

    #[test]
    fn test_excluded_directories_are_not_descended() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "app/package.json");
        touch(root, "fixtures/sample/package.json");

        let dirs = PackageFileFinder::new()
            .find_manifest_dirs(&[root.to_path_buf()], &["fixtures".to_string()])
            .unwrap();

        assert_eq!(dirs.npm, vec![root.join("app")]);
    }

    #[test]
    fn test_overlapping_roots_report_once() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "mod-a/web/package.json");

        let dirs = PackageFileFinder::new()
            .find_manifest_dirs(&[root.to_path_buf(), root.join("mod-a")], &[])
            .unwrap();

        assert_eq!(dirs.npm, vec![root.join("mod-a/web")]);
    }

    #[test]
    fn test_discovery_order_is_stable() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "b/package.json");
        touch(root, "a/package.json");
        touch(root, "c/package.json");

        let dirs = PackageFileFinder::new()
            .find_manifest_dirs(&[root.to_path_buf()], &[])
            .unwrap();

        assert_eq!(dirs.npm, vec![root.join("a"), root.join("b"), root.join("c")]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = PackageFileFinder::new()
            .find_manifest_dirs(&[temp.path().join("missing")], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = PackageFileFinder::new()
            .find_manifest_dirs(&[temp.path().to_path_buf()], &["**".to_string()]);
        assert!(result.is_err());
    }
}
