use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identity of one logical project.
///
/// Two refreshes of the same workspace derive equal keys for the same
/// project, which is what lets the registry reuse a manager across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectKey {
    name: String,
    path: PathBuf,
}

impl ProjectKey {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Key for a directory found by manifest discovery
    pub fn for_directory(directory: &Path) -> Self {
        Self::new(directory.display().to_string(), directory)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.path.display().to_string() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.path.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_keys_are_stable() {
        let a = ProjectKey::for_directory(Path::new("/ws/web"));
        let b = ProjectKey::for_directory(Path::new("/ws/web"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "/ws/web");
    }

    #[test]
    fn test_workspace_key_display() {
        let key = ProjectKey::new("shop", "/ws");
        assert_eq!(key.to_string(), "shop (/ws)");
        assert_eq!(key.name(), "shop");
        assert_eq!(key.path(), Path::new("/ws"));
    }
}
